//! The per-play-through state machine. One `Session` owns everything
//! that changes while a quiz is running; all mutation goes through the
//! operations below, never through the presentation layer.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quiz::feedback::FeedbackPool;
use crate::quiz::{answer, Question, QuestionKind, QuestionSet};

/// Points per correct decision. The score never decreases.
pub const POINTS_PER_QUESTION: u32 = 10;

/// Transient, variant-specific interaction state. Cleared on every
/// question transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Multiple-choice, true/false and image-choice decide immediately,
    /// so there is nothing to keep between gestures.
    None,
    /// The partial sequence picked so far, in pick order.
    Ordering { picked: Vec<String> },
    /// Pair ids already matched, plus at most one pending left card.
    Matching {
        matched: HashSet<String>,
        pending_left: Option<String>,
    },
}

impl Interaction {
    fn for_question(question: &Question) -> Self {
        match question.kind {
            QuestionKind::Ordering { .. } => Interaction::Ordering { picked: Vec::new() },
            QuestionKind::Matching { .. } => Interaction::Matching {
                matched: HashSet::new(),
                pending_left: None,
            },
            _ => Interaction::None,
        }
    }
}

/// The feedback being displayed during the lock window.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// What the terminal event reports: the final score and one bool per
/// question, in play order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SessionResult {
    pub final_score: u32,
    pub history: Vec<bool>,
}

/// What a submission did, so the coordinator can map it to sound cues
/// and scheduling without reading session internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Lock window, finished session, variant mismatch, or an id the
    /// question does not know. Silently absorbed, nothing changed.
    Ignored,
    /// The ordering sequence grew or shrank; no decision yet.
    OrderingUpdated,
    /// A left matching card is now pending.
    LeftSelected,
    /// A pair matched, but others remain.
    PairMatched,
    /// The pending left card did not match the clicked right card. The
    /// pending selection was cleared; the player may retry forever.
    MatchRejected,
    /// The question was decided and the session is now locked.
    Decided { correct: bool },
}

/// Where `advance` took the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    NextQuestion,
    Finished(SessionResult),
}

pub struct Session {
    questions: QuestionSet,
    feedback_pool: FeedbackPool,
    rng: StdRng,
    current: usize,
    score: u32,
    history: Vec<bool>,
    interaction: Interaction,
    feedback: Option<Feedback>,
    locked: bool,
    complete: bool,
}

impl Session {
    pub fn new(questions: QuestionSet) -> Self {
        Self::with_feedback(questions, FeedbackPool::default(), StdRng::from_entropy())
    }

    /// Same as `new` but with a pinned message pool and RNG, so tests
    /// can predict the chosen feedback.
    pub fn with_feedback(questions: QuestionSet, feedback_pool: FeedbackPool, rng: StdRng) -> Self {
        // QuestionSet::new guarantees at least one question.
        let interaction = Interaction::for_question(questions.get(0).unwrap());
        Self {
            questions,
            feedback_pool,
            rng,
            current: 0,
            score: 0,
            history: Vec::new(),
            interaction,
            feedback: None,
            locked: false,
            complete: false,
        }
    }

    // --- Snapshot ---

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question awaiting a decision, or `None` once the session has
    /// finished.
    pub fn current_question(&self) -> Option<&Question> {
        if self.complete {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    // --- Submissions ---

    /// Multiple-choice and image-choice answer. Decides immediately.
    pub fn submit_choice(&mut self, candidate: &str) -> SubmitOutcome {
        if !self.accepting_input() {
            return SubmitOutcome::Ignored;
        }
        let correct = match &self.questions.get(self.current).unwrap().kind {
            QuestionKind::MultipleChoice { correct_answer, .. }
            | QuestionKind::ImageChoice { correct_answer, .. } => {
                answer::choice_is_correct(correct_answer, candidate)
            }
            _ => return SubmitOutcome::Ignored,
        };
        self.record_decision(correct)
    }

    /// True/false answer. Decides immediately.
    pub fn submit_bool(&mut self, candidate: bool) -> SubmitOutcome {
        if !self.accepting_input() {
            return SubmitOutcome::Ignored;
        }
        let correct = match &self.questions.get(self.current).unwrap().kind {
            QuestionKind::TrueFalse { correct_answer } => {
                answer::true_false_is_correct(*correct_answer, candidate)
            }
            _ => return SubmitOutcome::Ignored,
        };
        self.record_decision(correct)
    }

    /// Adds the token to the partial sequence, or removes it if it was
    /// already picked. Once the sequence reaches full length the
    /// question is decided.
    pub fn toggle_ordering_item(&mut self, token: &str) -> SubmitOutcome {
        if !self.accepting_input() {
            return SubmitOutcome::Ignored;
        }
        let correct_order = match &self.questions.get(self.current).unwrap().kind {
            QuestionKind::Ordering { correct_order } => correct_order.clone(),
            _ => return SubmitOutcome::Ignored,
        };
        let picked = match &mut self.interaction {
            Interaction::Ordering { picked } => picked,
            _ => return SubmitOutcome::Ignored,
        };

        if let Some(position) = picked.iter().position(|t| t == token) {
            picked.remove(position);
            return SubmitOutcome::OrderingUpdated;
        }
        picked.push(token.to_string());

        if answer::order_is_complete(&correct_order, picked) {
            let correct = answer::order_is_correct(&correct_order, picked);
            return self.record_decision(correct);
        }
        SubmitOutcome::OrderingUpdated
    }

    /// Records the pending left card, overwriting any prior pending
    /// selection. Has no scoring effect on its own.
    pub fn select_match_left(&mut self, pair_id: &str) -> SubmitOutcome {
        if !self.accepting_input() {
            return SubmitOutcome::Ignored;
        }
        if !self.current_pair_exists(pair_id) {
            return SubmitOutcome::Ignored;
        }
        match &mut self.interaction {
            Interaction::Matching {
                matched,
                pending_left,
            } => {
                // Matched cards stay inert, like disabled buttons.
                if matched.contains(pair_id) {
                    return SubmitOutcome::Ignored;
                }
                *pending_left = Some(pair_id.to_string());
                SubmitOutcome::LeftSelected
            }
            _ => SubmitOutcome::Ignored,
        }
    }

    /// Resolves the pending left card against a right card. A match is
    /// kept; a mismatch only clears the pending selection and is never
    /// counted as an incorrect decision. The question is decided
    /// (correct) when the last pair matches.
    pub fn select_match_right(&mut self, pair_id: &str) -> SubmitOutcome {
        if !self.accepting_input() {
            return SubmitOutcome::Ignored;
        }
        if !self.current_pair_exists(pair_id) {
            return SubmitOutcome::Ignored;
        }
        let matching_pairs = match &self.questions.get(self.current).unwrap().kind {
            QuestionKind::Matching { matching_pairs } => matching_pairs.clone(),
            _ => return SubmitOutcome::Ignored,
        };
        let (matched, pending_left) = match &mut self.interaction {
            Interaction::Matching {
                matched,
                pending_left,
            } => (matched, pending_left),
            _ => return SubmitOutcome::Ignored,
        };

        if matched.contains(pair_id) {
            return SubmitOutcome::Ignored;
        }

        let pending = match pending_left.take() {
            Some(pending) => pending,
            None => return SubmitOutcome::Ignored,
        };

        if pending != pair_id {
            return SubmitOutcome::MatchRejected;
        }

        matched.insert(pending);
        if answer::all_pairs_matched(&matching_pairs, matched) {
            return self.record_decision(true);
        }
        SubmitOutcome::PairMatched
    }

    // --- Transitions ---

    fn accepting_input(&self) -> bool {
        !self.locked && !self.complete
    }

    fn current_pair_exists(&self, pair_id: &str) -> bool {
        match &self.questions.get(self.current).unwrap().kind {
            QuestionKind::Matching { matching_pairs } => {
                matching_pairs.iter().any(|pair| pair.id == pair_id)
            }
            _ => false,
        }
    }

    fn record_decision(&mut self, correct: bool) -> SubmitOutcome {
        self.locked = true;
        self.history.push(correct);
        if correct {
            self.score += POINTS_PER_QUESTION;
        }
        let message = if correct {
            self.feedback_pool.pick(&mut self.rng)
        } else {
            self.feedback_pool.retry().to_string()
        };
        self.feedback = Some(Feedback { correct, message });
        log::debug!(
            "question {} decided: {}",
            self.questions.get(self.current).unwrap().id,
            if correct { "correct" } else { "wrong" }
        );
        SubmitOutcome::Decided { correct }
    }

    /// Ends the feedback window: clears the transient state, unlocks,
    /// and moves on. Returns `None` when no feedback window is active,
    /// so a stray call cannot skip a question.
    pub fn advance(&mut self) -> Option<Advance> {
        if !self.locked || self.complete {
            return None;
        }
        self.locked = false;
        self.feedback = None;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.interaction = Interaction::for_question(self.questions.get(self.current).unwrap());
            return Some(Advance::NextQuestion);
        }

        self.complete = true;
        self.interaction = Interaction::None;
        let result = SessionResult {
            final_score: self.score,
            history: self.history.clone(),
        };
        log::info!(
            "session complete: {}/{} correct, score {}",
            result.history.iter().filter(|c| **c).count(),
            result.history.len(),
            result.final_score
        );
        Some(Advance::Finished(result))
    }
}
