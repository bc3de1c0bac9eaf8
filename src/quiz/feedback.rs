//! Feedback selection and the lock window that follows every decision.
//!
//! After a decision the session stays locked while the feedback message
//! is on screen, then a deferred advance moves it along. The runner
//! owns that timer: one cancelable task per decision, never two at once
//! (the lock makes a second decision impossible while one is pending).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::quiz::content;
use crate::quiz::session::{Advance, Session, SessionResult, SubmitOutcome};
use crate::quiz::sound::{Sound, SoundPlayer};

/// How long the in-question feedback stays up before the next question.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(2500);

/// Extra pause between the last question's feedback and the final
/// result. Tuned separately from `FEEDBACK_DELAY`.
pub const RESULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub feedback: Duration,
    pub result: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            feedback: FEEDBACK_DELAY,
            result: RESULT_DELAY,
        }
    }
}

/// The praise pool and the retry message. Praise is picked uniformly at
/// random with replacement, so the same message may repeat across
/// questions.
#[derive(Debug, Clone)]
pub struct FeedbackPool {
    praise: Vec<String>,
    retry: String,
}

impl FeedbackPool {
    pub fn new(praise: Vec<String>, retry: impl Into<String>) -> Self {
        Self {
            praise,
            retry: retry.into(),
        }
    }

    pub fn pick(&self, rng: &mut impl Rng) -> String {
        self.praise
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| self.retry.clone())
    }

    pub fn retry(&self) -> &str {
        &self.retry
    }
}

impl Default for FeedbackPool {
    fn default() -> Self {
        Self::new(
            content::FEEDBACK_MESSAGES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            content::RETRY_MESSAGE,
        )
    }
}

type CompletionCallback = Box<dyn FnOnce(SessionResult) + Send>;

/// Drives a `Session` on the async runtime: forwards submissions, plays
/// the sound cues, and schedules the delayed advance after each
/// decision. Dropping the runner aborts any pending advance, so a timer
/// can never fire against a discarded session.
pub struct QuizRunner {
    session: Arc<Mutex<Session>>,
    sounds: Arc<dyn SoundPlayer>,
    timing: Timing,
    on_complete: Arc<Mutex<Option<CompletionCallback>>>,
    turn_over: Arc<Notify>,
    pending: Option<JoinHandle<()>>,
}

impl QuizRunner {
    pub fn new(
        session: Session,
        sounds: Arc<dyn SoundPlayer>,
        on_complete: impl FnOnce(SessionResult) + Send + 'static,
    ) -> Self {
        Self::with_timing(session, sounds, Timing::default(), on_complete)
    }

    pub fn with_timing(
        session: Session,
        sounds: Arc<dyn SoundPlayer>,
        timing: Timing,
        on_complete: impl FnOnce(SessionResult) + Send + 'static,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            sounds,
            timing,
            on_complete: Arc::new(Mutex::new(Some(Box::new(on_complete)))),
            turn_over: Arc::new(Notify::new()),
            pending: None,
        }
    }

    /// Reads the session snapshot. Reads never mutate.
    pub fn snapshot<R>(&self, read: impl FnOnce(&Session) -> R) -> R {
        read(&self.session.lock().unwrap())
    }

    /// Resolves once the pending feedback window has ended and the
    /// session has advanced (or finished). Lets a shell sleep instead
    /// of polling the lock flag.
    pub async fn turn_ended(&self) {
        self.turn_over.notified().await;
    }

    // --- Forwarded submissions ---

    pub fn submit_choice(&mut self, candidate: &str) -> SubmitOutcome {
        let outcome = self.session.lock().unwrap().submit_choice(candidate);
        self.react(outcome)
    }

    pub fn submit_bool(&mut self, candidate: bool) -> SubmitOutcome {
        let outcome = self.session.lock().unwrap().submit_bool(candidate);
        self.react(outcome)
    }

    pub fn toggle_ordering_item(&mut self, token: &str) -> SubmitOutcome {
        let outcome = self.session.lock().unwrap().toggle_ordering_item(token);
        self.react(outcome)
    }

    pub fn select_match_left(&mut self, pair_id: &str) -> SubmitOutcome {
        let outcome = self.session.lock().unwrap().select_match_left(pair_id);
        self.react(outcome)
    }

    pub fn select_match_right(&mut self, pair_id: &str) -> SubmitOutcome {
        let outcome = self.session.lock().unwrap().select_match_right(pair_id);
        self.react(outcome)
    }

    fn react(&mut self, outcome: SubmitOutcome) -> SubmitOutcome {
        match outcome {
            SubmitOutcome::Ignored | SubmitOutcome::OrderingUpdated => {}
            SubmitOutcome::LeftSelected => self.sounds.play(Sound::Click),
            SubmitOutcome::PairMatched => self.sounds.play(Sound::Correct),
            SubmitOutcome::MatchRejected => self.sounds.play(Sound::Wrong),
            SubmitOutcome::Decided { correct } => {
                self.sounds.play(if correct { Sound::Correct } else { Sound::Wrong });
                self.schedule_advance();
            }
        }
        outcome
    }

    fn schedule_advance(&mut self) {
        let session = Arc::clone(&self.session);
        let sounds = Arc::clone(&self.sounds);
        let on_complete = Arc::clone(&self.on_complete);
        let turn_over = Arc::clone(&self.turn_over);
        let timing = self.timing;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(timing.feedback).await;
            let advanced = session.lock().unwrap().advance();
            turn_over.notify_one();

            if let Some(Advance::Finished(result)) = advanced {
                tokio::time::sleep(timing.result).await;
                sounds.play(Sound::Win);
                let callback = on_complete.lock().unwrap().take();
                if let Some(callback) = callback {
                    callback(result);
                }
            }
        }));
    }
}

impl Drop for QuizRunner {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
