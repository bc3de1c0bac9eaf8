//! End-to-end runs of whole quiz sessions through the coordinator,
//! with the tokio clock paused so the feedback windows are exact.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use kids_quiz::quiz::content;
use kids_quiz::quiz::feedback::{FeedbackPool, QuizRunner, FEEDBACK_DELAY, RESULT_DELAY};
use kids_quiz::quiz::session::{Session, SessionResult, SubmitOutcome};
use kids_quiz::quiz::sound::NoSound;
use kids_quiz::quiz::{Question, QuestionKind, QuestionSet};

fn collecting_runner(session: Session) -> (QuizRunner, Arc<Mutex<Option<SessionResult>>>) {
    let seen = Arc::new(Mutex::new(None));
    let seen_in_callback = Arc::clone(&seen);
    let runner = QuizRunner::new(session, Arc::new(NoSound), move |result| {
        *seen_in_callback.lock().unwrap() = Some(result);
    });
    (runner, seen)
}

async fn let_the_window_pass() {
    tokio::time::sleep(FEEDBACK_DELAY + Duration::from_millis(100)).await;
}

/// Answers the current question correctly, whatever its kind.
fn answer_correctly(runner: &mut QuizRunner) {
    let question = runner
        .snapshot(|s| s.current_question().cloned())
        .expect("session still running");
    match &question.kind {
        QuestionKind::MultipleChoice { correct_answer, .. }
        | QuestionKind::ImageChoice { correct_answer, .. } => {
            assert_eq!(
                runner.submit_choice(correct_answer),
                SubmitOutcome::Decided { correct: true }
            );
        }
        QuestionKind::TrueFalse { correct_answer } => {
            assert_eq!(
                runner.submit_bool(*correct_answer),
                SubmitOutcome::Decided { correct: true }
            );
        }
        QuestionKind::Ordering { correct_order } => {
            for token in correct_order {
                runner.toggle_ordering_item(token);
            }
            assert!(runner.snapshot(|s| s.is_locked()));
        }
        QuestionKind::Matching { matching_pairs } => {
            for pair in matching_pairs {
                runner.select_match_left(&pair.id);
                runner.select_match_right(&pair.id);
            }
            assert!(runner.snapshot(|s| s.is_locked()));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn a_perfect_run_of_the_built_in_quiz_scores_100() {
    let questions = content::questions().unwrap();
    let total = questions.len();
    let (mut runner, seen) = collecting_runner(Session::new(questions));

    for _ in 0..total {
        answer_correctly(&mut runner);
        let_the_window_pass().await;
    }

    assert!(runner.snapshot(|s| s.is_complete()));
    tokio::time::sleep(RESULT_DELAY).await;

    let result = seen.lock().unwrap().clone().unwrap();
    assert_eq!(result.final_score, 100);
    assert_eq!(result.history, vec![true; total]);
}

#[tokio::test(start_paused = true)]
async fn one_slip_costs_exactly_ten_points() {
    let questions = content::questions().unwrap();
    let total = questions.len();
    let (mut runner, seen) = collecting_runner(Session::new(questions));

    // Miss the first question, then recover.
    assert_eq!(
        runner.submit_choice("أحمد"),
        SubmitOutcome::Decided { correct: false }
    );
    let_the_window_pass().await;

    for _ in 1..total {
        answer_correctly(&mut runner);
        let_the_window_pass().await;
    }
    tokio::time::sleep(RESULT_DELAY).await;

    let result = seen.lock().unwrap().clone().unwrap();
    assert_eq!(result.final_score, 90);
    assert!(!result.history[0]);
    assert_eq!(result.history.len(), total);
    assert!(result.history[1..].iter().all(|&correct| correct));
}

#[tokio::test(start_paused = true)]
async fn scenario_a_through_the_coordinator() {
    let questions = QuestionSet::new(vec![
        Question::new(
            1,
            "q1",
            QuestionKind::MultipleChoice {
                options: vec!["X".into(), "Y".into()],
                correct_answer: "X".into(),
            },
        ),
        Question::new(2, "q2", QuestionKind::TrueFalse { correct_answer: true }),
    ])
    .unwrap();
    let session = Session::with_feedback(
        questions,
        FeedbackPool::new(vec!["يا سلام".to_string()], "حاول مرة أخرى"),
        StdRng::seed_from_u64(11),
    );
    let (mut runner, seen) = collecting_runner(session);

    assert_eq!(
        runner.submit_choice("X"),
        SubmitOutcome::Decided { correct: true }
    );
    assert_eq!(runner.snapshot(|s| s.score()), 10);
    assert_eq!(
        runner.snapshot(|s| s.feedback().unwrap().message.clone()),
        "يا سلام"
    );

    let_the_window_pass().await;
    assert_eq!(runner.snapshot(|s| s.current_index()), 1);
    assert!(runner.snapshot(|s| s.feedback().is_none()));

    assert_eq!(
        runner.submit_bool(false),
        SubmitOutcome::Decided { correct: false }
    );
    assert_eq!(
        runner.snapshot(|s| s.feedback().unwrap().message.clone()),
        "حاول مرة أخرى"
    );

    let_the_window_pass().await;
    tokio::time::sleep(RESULT_DELAY).await;

    let result = seen.lock().unwrap().clone().unwrap();
    assert_eq!(result.final_score, 10);
    assert_eq!(result.history, vec![true, false]);
}

#[test]
fn the_authoring_format_round_trips() {
    let set = content::questions().unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let reloaded = QuestionSet::from_json(json.as_bytes()).unwrap();
    assert_eq!(set, reloaded);
}
