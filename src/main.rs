use std::sync::Arc;

use dotenv::dotenv;
use rand::seq::SliceRandom;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::oneshot;

use kids_quiz::quiz::content;
use kids_quiz::quiz::feedback::QuizRunner;
use kids_quiz::quiz::session::{
    Interaction, Session, SessionResult, SubmitOutcome, POINTS_PER_QUESTION,
};
use kids_quiz::quiz::sound::{Sound, SoundPlayer, TerminalBell};
use kids_quiz::quiz::{MatchingPair, Question, QuestionKind, QuestionSet};

type Input = Lines<BufReader<Stdin>>;

const TITLE: &str = "🏆 لعبة أول من رفع يده 🏆";
const READY_PROMPT: &str = "هل أنت مستعد لاختبار معلوماتك؟ اضغط Enter للبدء!";
const TAGLINE: &str = "صممت للأذكياء والأبطال الصغار";
const ORDERING_HINT: &str = "اضغط على الجمل بالترتيب الصحيح:";
const MATCHING_HINT: &str = "طابق: اختر رقم بطاقة ثم حرف البطاقة المناسبة:";
const PLAY_AGAIN_PROMPT: &str = "العب مرة أخرى؟ (y/n)";
const INVALID_INPUT: &str = "من فضلك اختر من القائمة";

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting the quiz...");

    let questions = content::questions().expect("built-in question set failed validation");
    let sounds: Arc<dyn SoundPlayer> = Arc::new(TerminalBell);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!();
    println!("{}", TITLE);
    println!("{}", READY_PROMPT);
    if read_line(&mut input).await.is_none() {
        return;
    }

    loop {
        sounds.play(Sound::Click);
        let result = match play(questions.clone(), Arc::clone(&sounds), &mut input).await {
            Some(result) => result,
            // Stdin closed mid-game; the runner drop cancels the timer.
            None => return,
        };
        render_result(&result, questions.len());

        println!("{}", PLAY_AGAIN_PROMPT);
        match read_line(&mut input).await {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }
    println!("{}", TAGLINE);
}

async fn read_line(input: &mut Input) -> Option<String> {
    input.next_line().await.ok().flatten()
}

/// One full play-through. Returns `None` only if stdin closed early.
async fn play(
    questions: QuestionSet,
    sounds: Arc<dyn SoundPlayer>,
    input: &mut Input,
) -> Option<SessionResult> {
    let total = questions.len();
    let layouts = scramble_layouts(&questions);

    let (done_tx, done_rx) = oneshot::channel();
    let mut runner = QuizRunner::new(Session::new(questions), sounds, move |result| {
        let _ = done_tx.send(result);
    });

    loop {
        if runner.snapshot(|s| s.is_complete()) {
            break;
        }
        let question = runner
            .snapshot(|s| s.current_question().cloned())
            .expect("active session has a current question");
        let index = runner.snapshot(|s| s.current_index());
        render_question(&runner, &question, index, total, &layouts[index]);

        let line = read_line(input).await?;
        match dispatch(&mut runner, &question, &layouts[index], line.trim()) {
            Some(SubmitOutcome::Decided { .. }) => {
                if let Some(feedback) = runner.snapshot(|s| s.feedback().cloned()) {
                    let mark = if feedback.correct { "✅" } else { "❌" };
                    println!();
                    println!("  {} {}", mark, feedback.message);
                }
                runner.turn_ended().await;
            }
            Some(_) => {}
            None => println!("{}", INVALID_INPUT),
        }
    }

    done_rx.await.ok()
}

/// Scrambled display layouts, fixed once per play-through so re-renders
/// keep every button in place.
enum Layout {
    Plain,
    OrderingPool(Vec<String>),
    MatchingRight(Vec<MatchingPair>),
}

fn scramble_layouts(questions: &QuestionSet) -> Vec<Layout> {
    let mut rng = rand::thread_rng();
    questions
        .iter()
        .map(|question| match &question.kind {
            QuestionKind::Ordering { correct_order } => {
                let mut pool = correct_order.clone();
                pool.shuffle(&mut rng);
                Layout::OrderingPool(pool)
            }
            QuestionKind::Matching { matching_pairs } => {
                let mut right = matching_pairs.clone();
                right.shuffle(&mut rng);
                Layout::MatchingRight(right)
            }
            _ => Layout::Plain,
        })
        .collect()
}

fn render_question(
    runner: &QuizRunner,
    question: &Question,
    index: usize,
    total: usize,
    layout: &Layout,
) {
    let score = runner.snapshot(|s| s.score());
    let history = runner.snapshot(|s| s.history().to_vec());

    println!();
    println!("═══ سؤال {} من {} ═══ 🏆 {}", index + 1, total, score);
    println!("{}", progress_dots(&history, total));
    println!();
    println!("{}", question.text);

    match &question.kind {
        QuestionKind::MultipleChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                println!("  {}) {}", i + 1, option);
            }
        }
        QuestionKind::TrueFalse { .. } => {
            println!("  1) ✔ صح");
            println!("  2) ✘ خطأ");
        }
        QuestionKind::Ordering { .. } => {
            let picked = runner.snapshot(|s| match s.interaction() {
                Interaction::Ordering { picked } => picked.clone(),
                _ => Vec::new(),
            });
            println!("{}", ORDERING_HINT);
            let chosen = picked
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect::<Vec<_>>()
                .join("  ");
            if chosen.is_empty() {
                println!("  [...]");
            } else {
                println!("  [{}]", chosen);
            }
            if let Layout::OrderingPool(pool) = layout {
                for (i, item) in pool.iter().enumerate() {
                    let mark = if picked.contains(item) { " ✓" } else { "" };
                    println!("  {}) {}{}", i + 1, item, mark);
                }
            }
        }
        QuestionKind::Matching { matching_pairs } => {
            let (matched, pending) = runner.snapshot(|s| match s.interaction() {
                Interaction::Matching {
                    matched,
                    pending_left,
                } => (matched.clone(), pending_left.clone()),
                _ => (Default::default(), None),
            });
            println!("{}", MATCHING_HINT);
            for (i, pair) in matching_pairs.iter().enumerate() {
                let mark = if matched.contains(&pair.id) {
                    " ✓"
                } else if pending.as_deref() == Some(pair.id.as_str()) {
                    " ◀"
                } else {
                    ""
                };
                println!("  {}) {}{}", i + 1, pair.left, mark);
            }
            if let Layout::MatchingRight(right) = layout {
                for (i, pair) in right.iter().enumerate() {
                    let mark = if matched.contains(&pair.id) { " ✓" } else { "" };
                    println!("  {}) {}{}", letter(i), pair.right, mark);
                }
            }
        }
        QuestionKind::ImageChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                println!("  {}) {}", i + 1, pictogram(option));
            }
        }
    }
    print!("> ");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}

fn dispatch(
    runner: &mut QuizRunner,
    question: &Question,
    layout: &Layout,
    line: &str,
) -> Option<SubmitOutcome> {
    match &question.kind {
        QuestionKind::MultipleChoice { options, .. }
        | QuestionKind::ImageChoice { options, .. } => {
            let pick = parse_index(line, options.len())?;
            Some(runner.submit_choice(&options[pick]))
        }
        QuestionKind::TrueFalse { .. } => match line {
            "1" => Some(runner.submit_bool(true)),
            "2" => Some(runner.submit_bool(false)),
            _ => None,
        },
        QuestionKind::Ordering { .. } => {
            let pool = match layout {
                Layout::OrderingPool(pool) => pool,
                _ => return None,
            };
            let pick = parse_index(line, pool.len())?;
            Some(runner.toggle_ordering_item(&pool[pick]))
        }
        QuestionKind::Matching { matching_pairs } => {
            if let Some(pick) = parse_index(line, matching_pairs.len()) {
                return Some(runner.select_match_left(&matching_pairs[pick].id));
            }
            let right = match layout {
                Layout::MatchingRight(right) => right,
                _ => return None,
            };
            let pick = parse_letter(line, right.len())?;
            Some(runner.select_match_right(&right[pick].id))
        }
    }
}

fn parse_index(line: &str, len: usize) -> Option<usize> {
    let n: usize = line.parse().ok()?;
    if n >= 1 && n <= len {
        Some(n - 1)
    } else {
        None
    }
}

fn parse_letter(line: &str, len: usize) -> Option<usize> {
    let mut chars = line.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() || !c.is_ascii_lowercase() {
        return None;
    }
    let i = (c as u8 - b'a') as usize;
    if i < len {
        Some(i)
    } else {
        None
    }
}

fn letter(i: usize) -> char {
    (b'a' + i as u8) as char
}

fn pictogram(token: &str) -> String {
    let icon = match token {
        "hand" => "✋",
        "sleep" => "🌙",
        "run" => "🏃",
        _ => "❓",
    };
    format!("{}  ({})", icon, token)
}

fn progress_dots(history: &[bool], total: usize) -> String {
    (0..total)
        .map(|i| match history.get(i) {
            Some(true) => "🟢",
            Some(false) => "🔴",
            None => "⚪",
        })
        .collect()
}

fn render_result(result: &SessionResult, total: usize) {
    let max_score = total as u32 * POINTS_PER_QUESTION;
    let (emoji, message) = if result.final_score == max_score {
        ("👑", "أنت بطل الشجاعة!")
    } else if result.final_score >= max_score * 7 / 10 {
        ("🌟", "إجابات ممتازة!")
    } else {
        ("💪", "حاول مرة أخرى!")
    };

    println!();
    println!(
        "{} النتيجة النهائية: {} / {}",
        emoji, result.final_score, max_score
    );
    println!("{}", message);
    println!("{}", progress_dots(&result.history, total));
    println!();
}
