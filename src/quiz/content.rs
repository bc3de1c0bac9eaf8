//! The built-in question set: a ten-question reading quiz about the
//! "first to raise a hand" story, plus the feedback messages shown
//! after each decision.

use crate::quiz::{MatchingPair, Question, QuestionKind, QuestionSet, QuizError};

/// Praise shown after a correct answer, picked at random per question.
pub const FEEDBACK_MESSAGES: [&str; 8] = [
    "أحسنت يا بطل! 🌟",
    "شاطر جداً! 👏",
    "هائل! 🚀",
    "ممتاز! 🏆",
    "رائع! 🌈",
    "ذكي جداً! 🧠",
    "إجابة مذهلة! ✨",
    "عمل رائع! 💪",
];

/// Shown after a wrong answer.
pub const RETRY_MESSAGE: &str = "حاول مرة أخرى";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The authored quiz, in play order. Runs through the usual load-time
/// validation so an authoring slip fails at startup, not mid-game.
pub fn questions() -> Result<QuestionSet, QuizError> {
    QuestionSet::new(vec![
        Question::new(
            1,
            "من كانت أول من رفعت يدها؟",
            QuestionKind::MultipleChoice {
                options: strings(&["أحمد", "يوسف", "إيمان", "سارة"]),
                correct_answer: "إيمان".to_string(),
            },
        ),
        Question::new(
            2,
            "المعلم كان غاضبًا عندما سأل السؤال.",
            QuestionKind::TrueFalse {
                correct_answer: false,
            },
        ),
        Question::new(
            3,
            "لماذا رفعت إيمان يدها؟",
            QuestionKind::MultipleChoice {
                options: strings(&[
                    "لتلعب",
                    "لتجاوب سؤال المعلم",
                    "لأن زملاءها طلبوا منها",
                    "لأنها كانت زهقانة",
                ]),
                correct_answer: "لتجاوب سؤال المعلم".to_string(),
            },
        ),
        Question::new(
            4,
            "رتب أحداث القصة:",
            QuestionKind::Ordering {
                correct_order: strings(&[
                    "المعلم يسأل",
                    "إيمان ترفع يدها",
                    "المعلم يختارها",
                    "إيمان تجيب",
                ]),
            },
        ),
        Question::new(
            5,
            "كيف شعرت إيمان بعد الإجابة؟",
            QuestionKind::MultipleChoice {
                options: strings(&["حزينة", "خائفة", "مبسوطة", "غاضبة"]),
                correct_answer: "مبسوطة".to_string(),
            },
        ),
        Question::new(
            6,
            "أكمل: إيمان كانت _____ عندما رفعت يدها.",
            QuestionKind::MultipleChoice {
                options: strings(&["مترددة", "حزينة", "شجاعة"]),
                correct_answer: "شجاعة".to_string(),
            },
        ),
        Question::new(
            7,
            "طابق بين الشخص والحدث:",
            QuestionKind::Matching {
                matching_pairs: vec![
                    MatchingPair::new("m1", "المعلم", "يسأل"),
                    MatchingPair::new("m2", "يد مرفوعة", "تريد الإجابة"),
                    MatchingPair::new("m3", "طالبة تتكلم", "تشرح"),
                    MatchingPair::new("m4", "المعلم يبتسم", "يشجع"),
                ],
            },
        ),
        Question::new(
            8,
            "ماذا نتعلم من القصة؟",
            QuestionKind::MultipleChoice {
                options: strings(&["الضوضاء", "النوم", "الشجاعة والمشاركة", "الكذب"]),
                correct_answer: "الشجاعة والمشاركة".to_string(),
            },
        ),
        Question::new(
            9,
            "إيمان رفضت الإجابة.",
            QuestionKind::TrueFalse {
                correct_answer: false,
            },
        ),
        Question::new(
            10,
            "اختر الرمز الذي يعبر عن 'رفع اليد':",
            QuestionKind::ImageChoice {
                options: strings(&["hand", "sleep", "run"]),
                correct_answer: "hand".to_string(),
            },
        ),
    ])
}
