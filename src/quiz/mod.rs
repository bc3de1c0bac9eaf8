pub mod answer;
pub mod content;
pub mod feedback;
pub mod session;
pub mod sound;

use std::collections::HashSet;
use std::io::Read;

use thiserror::Error;

/// One left/right card pair of a matching question. `id` is the unit of
/// correctness: a pair is matched by id, never by token text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchingPair {
    pub id: String,
    pub left: String,
    pub right: String,
}

impl MatchingPair {
    pub fn new(id: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            left: left.into(),
            right: right.into(),
        }
    }
}

/// The five supported question kinds, each with its own payload.
///
/// Serialized in the authoring format: a `type` tag in screaming snake
/// case and camelCase payload keys, e.g.
/// `{"type": "MULTIPLE_CHOICE", "options": [...], "correctAnswer": "..."}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    #[serde(rename_all = "camelCase")]
    TrueFalse { correct_answer: bool },
    #[serde(rename_all = "camelCase")]
    Ordering { correct_order: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Matching { matching_pairs: Vec<MatchingPair> },
    #[serde(rename_all = "camelCase")]
    ImageChoice {
        options: Vec<String>,
        correct_answer: String,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question list is empty")]
    EmptyQuiz,

    #[error("duplicate question id {0}")]
    DuplicateQuestionId(u32),

    #[error("question {id}: option list is empty")]
    NoOptions { id: u32 },

    #[error("question {id}: duplicate option \"{option}\"")]
    DuplicateOption { id: u32, option: String },

    #[error("question {id}: correct answer \"{answer}\" is not one of the options")]
    AnswerNotInOptions { id: u32, answer: String },

    #[error("question {id}: correct order is empty")]
    EmptyOrder { id: u32 },

    #[error("question {id}: duplicate token \"{token}\" in correct order")]
    DuplicateOrderToken { id: u32, token: String },

    #[error("question {id}: matching pair list is empty")]
    NoPairs { id: u32 },

    #[error("question {id}: duplicate pair id \"{pair_id}\"")]
    DuplicatePairId { id: u32, pair_id: String },

    #[error("failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable, ordered question list, checked once at load time.
///
/// Malformed questions are an authoring defect, so construction rejects
/// them instead of letting a bad payload produce silently wrong scoring.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        let mut seen_ids = HashSet::new();
        for question in &questions {
            if !seen_ids.insert(question.id) {
                return Err(QuizError::DuplicateQuestionId(question.id));
            }
            validate_payload(question)?;
        }

        Ok(Self { questions })
    }

    /// Loads a question list in the authoring JSON format.
    pub fn from_json(reader: impl Read) -> Result<Self, QuizError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

fn validate_payload(question: &Question) -> Result<(), QuizError> {
    let id = question.id;
    match &question.kind {
        QuestionKind::MultipleChoice {
            options,
            correct_answer,
        }
        | QuestionKind::ImageChoice {
            options,
            correct_answer,
        } => {
            if options.is_empty() {
                return Err(QuizError::NoOptions { id });
            }
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option.as_str()) {
                    return Err(QuizError::DuplicateOption {
                        id,
                        option: option.clone(),
                    });
                }
            }
            if !options.contains(correct_answer) {
                return Err(QuizError::AnswerNotInOptions {
                    id,
                    answer: correct_answer.clone(),
                });
            }
        }
        QuestionKind::TrueFalse { .. } => {}
        QuestionKind::Ordering { correct_order } => {
            if correct_order.is_empty() {
                return Err(QuizError::EmptyOrder { id });
            }
            let mut seen = HashSet::new();
            for token in correct_order {
                if !seen.insert(token.as_str()) {
                    return Err(QuizError::DuplicateOrderToken {
                        id,
                        token: token.clone(),
                    });
                }
            }
        }
        QuestionKind::Matching { matching_pairs } => {
            if matching_pairs.is_empty() {
                return Err(QuizError::NoPairs { id });
            }
            let mut seen = HashSet::new();
            for pair in matching_pairs {
                if !seen.insert(pair.id.as_str()) {
                    return Err(QuizError::DuplicatePairId {
                        id,
                        pair_id: pair.id.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: u32, options: &[&str], correct: &str) -> Question {
        Question::new(
            id,
            format!("q{}", id),
            QuestionKind::MultipleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: correct.to_string(),
            },
        )
    }

    #[test]
    fn accepts_a_well_formed_set() {
        let set = QuestionSet::new(vec![
            choice(1, &["a", "b"], "a"),
            Question::new(2, "q2", QuestionKind::TrueFalse { correct_answer: true }),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().id, 1);
        assert!(set.get(2).is_none());
    }

    #[test]
    fn rejects_an_empty_set() {
        assert!(matches!(QuestionSet::new(vec![]), Err(QuizError::EmptyQuiz)));
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let result = QuestionSet::new(vec![
            choice(7, &["a", "b"], "a"),
            choice(7, &["c", "d"], "c"),
        ]);
        assert!(matches!(result, Err(QuizError::DuplicateQuestionId(7))));
    }

    #[test]
    fn rejects_a_correct_answer_outside_the_options() {
        let result = QuestionSet::new(vec![choice(1, &["a", "b"], "z")]);
        assert!(matches!(
            result,
            Err(QuizError::AnswerNotInOptions { id: 1, .. })
        ));
    }

    #[test]
    fn rejects_empty_and_duplicate_options() {
        assert!(matches!(
            QuestionSet::new(vec![choice(1, &[], "a")]),
            Err(QuizError::NoOptions { id: 1 })
        ));
        assert!(matches!(
            QuestionSet::new(vec![choice(1, &["a", "a"], "a")]),
            Err(QuizError::DuplicateOption { id: 1, .. })
        ));
    }

    #[test]
    fn rejects_malformed_ordering_and_matching_payloads() {
        let empty_order = Question::new(3, "q3", QuestionKind::Ordering { correct_order: vec![] });
        assert!(matches!(
            QuestionSet::new(vec![empty_order]),
            Err(QuizError::EmptyOrder { id: 3 })
        ));

        let doubled = Question::new(
            4,
            "q4",
            QuestionKind::Ordering {
                correct_order: vec!["x".into(), "x".into()],
            },
        );
        assert!(matches!(
            QuestionSet::new(vec![doubled]),
            Err(QuizError::DuplicateOrderToken { id: 4, .. })
        ));

        let clashing_pairs = Question::new(
            5,
            "q5",
            QuestionKind::Matching {
                matching_pairs: vec![
                    MatchingPair::new("m1", "l1", "r1"),
                    MatchingPair::new("m1", "l2", "r2"),
                ],
            },
        );
        assert!(matches!(
            QuestionSet::new(vec![clashing_pairs]),
            Err(QuizError::DuplicatePairId { id: 5, .. })
        ));
    }

    #[test]
    fn loads_the_authoring_json_format() {
        let json = r#"[
            {
                "id": 1,
                "text": "pick one",
                "type": "MULTIPLE_CHOICE",
                "options": ["a", "b"],
                "correctAnswer": "b"
            },
            {
                "id": 2,
                "text": "true or false",
                "type": "TRUE_FALSE",
                "correctAnswer": false
            },
            {
                "id": 3,
                "text": "sort these",
                "type": "ORDERING",
                "correctOrder": ["first", "second"]
            },
            {
                "id": 4,
                "text": "match these",
                "type": "MATCHING",
                "matchingPairs": [
                    { "id": "m1", "left": "sun", "right": "day" },
                    { "id": "m2", "left": "moon", "right": "night" }
                ]
            },
            {
                "id": 5,
                "text": "pick a picture",
                "type": "IMAGE_CHOICE",
                "options": ["hand", "sleep"],
                "correctAnswer": "hand"
            }
        ]"#;

        let set = QuestionSet::from_json(json.as_bytes()).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(
            set.get(1).unwrap().kind,
            QuestionKind::TrueFalse {
                correct_answer: false
            }
        );
        match &set.get(3).unwrap().kind {
            QuestionKind::Matching { matching_pairs } => {
                assert_eq!(matching_pairs[1].id, "m2");
                assert_eq!(matching_pairs[1].right, "night");
            }
            other => panic!("expected a matching payload, got {:?}", other),
        }
    }

    #[test]
    fn rejects_a_parse_error_from_json() {
        let result = QuestionSet::from_json("not json".as_bytes());
        assert!(matches!(result, Err(QuizError::Parse(_))));
    }
}
