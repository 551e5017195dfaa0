//! Catalog loading and validation
//!
//! The catalog is the ordered, immutable list of questions played in a
//! session. It is loaded once and rejected as a whole if any record is
//! malformed, so the controller never meets a question it cannot render.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::catalog::MAX_QUESTION_COUNT;

use super::question::{Question, QuestionId, QuestionSerde};

/// Errors raised while loading a question catalog
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The catalog is not valid JSON or a record lacks an id
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A record names a question type that is not yesno, mcq or input
    #[error("question {id} has unknown type {kind:?}")]
    UnknownType {
        /// The offending question
        id: QuestionId,
        /// The type as written in the catalog
        kind: String,
    },
    /// A record lacks a field its type requires
    #[error("question {id} is missing field {field}")]
    MissingField {
        /// The offending question
        id: QuestionId,
        /// Wire name of the missing field
        field: &'static str,
    },
    /// The expected answer of a yes/no question is neither "yes" nor "no"
    #[error("question {id} expects an answer other than yes or no")]
    UnexpectedYesNoAnswer {
        /// The offending question
        id: QuestionId,
    },
    /// The expected answer of a multiple choice question is not among its options
    #[error("question {id} expects an answer that is not one of its options")]
    AnswerNotAnOption {
        /// The offending question
        id: QuestionId,
    },
    /// Two records share an id
    #[error("question id {0} is used more than once")]
    DuplicateId(QuestionId),
    /// The catalog holds no questions
    #[error("catalog has no questions")]
    Empty,
    /// A length or count limit is exceeded
    #[error("invalid catalog: {0}")]
    Invalid(#[from] garde::Report),
}

/// The ordered sequence of questions for a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct Catalog {
    /// Questions in play order
    #[garde(length(max = MAX_QUESTION_COUNT), dive)]
    questions: Vec<Question>,
}

impl TryFrom<Vec<Question>> for Catalog {
    type Error = ConfigurationError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<Catalog> for Vec<Question> {
    fn from(catalog: Catalog) -> Self {
        catalog.questions
    }
}

impl Catalog {
    /// Creates a catalog from questions in play order
    ///
    /// # Errors
    ///
    /// * `ConfigurationError::Empty` - no questions were given
    /// * `ConfigurationError::DuplicateId` - two questions share an id
    /// * `ConfigurationError::Invalid` - a length or count limit is exceeded
    pub fn new(questions: Vec<Question>) -> Result<Self, ConfigurationError> {
        if questions.is_empty() {
            return Err(ConfigurationError::Empty);
        }
        if let Some(id) = questions.iter().map(Question::id).duplicates().next() {
            return Err(ConfigurationError::DuplicateId(id));
        }

        let catalog = Self { questions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from its JSON form, an array of question records
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, in record order.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let records: Vec<QuestionSerde> = serde_json::from_str(json)?;
        let questions = records
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// Returns the number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`: an empty catalog cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the question at `index`
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the questions in play order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::QuestionKind;

    const CATALOG: &str = r#"[
        {"id": 1, "level": 1, "type": "yesno", "question": "Do you like trivia?", "answer": "yes", "funFact": "Trivia comes from Latin."},
        {"id": 2, "level": 2, "type": "mcq", "question": "Pick b", "options": ["a", "b"], "answer": "b", "funFact": "b is the second letter."},
        {"id": 3, "level": 3, "type": "input", "question": "Anything to add?", "funFact": "Thanks!"}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(1).map(Question::text), Some("Pick b"));
        assert!(catalog.get(3).is_none());
        assert_eq!(
            catalog.questions().iter().map(|q| q.kind().tag()).collect_vec(),
            vec!["yesno", "mcq", "input"]
        );
    }

    #[test]
    fn test_from_json_syntax_error() {
        assert!(matches!(
            Catalog::from_json("[{"),
            Err(ConfigurationError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_json_empty() {
        assert!(matches!(
            Catalog::from_json("[]"),
            Err(ConfigurationError::Empty)
        ));
    }

    #[test]
    fn test_from_json_unknown_type_fails_fast() {
        let json = r#"[
            {"id": 1, "level": 1, "type": "yesno", "question": "?", "answer": "yes", "funFact": ""},
            {"id": 2, "level": 2, "type": "dropdown", "question": "?", "funFact": ""}
        ]"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(ConfigurationError::UnknownType { id, .. }) if id == QuestionId::from(2)
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let json = r#"[
            {"id": 1, "level": 1, "type": "input", "question": "?", "funFact": ""},
            {"id": 1, "level": 2, "type": "input", "question": "?", "funFact": ""}
        ]"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(ConfigurationError::DuplicateId(id)) if id == QuestionId::from(1)
        ));
    }

    #[test]
    fn test_too_many_questions() {
        let questions = (0..=MAX_QUESTION_COUNT as u32)
            .map(|id| Question::new(id, 1, "?", QuestionKind::Input, "").unwrap())
            .collect_vec();

        assert!(matches!(
            Catalog::new(questions),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_question_text_too_long() {
        let long = "a".repeat(crate::constants::catalog::MAX_QUESTION_LENGTH + 1);
        let question = Question::new(1, 1, long, QuestionKind::Input, "").unwrap();

        assert!(matches!(
            Catalog::new(vec![question]),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_deserialize_through_serde() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let result: Result<Catalog, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_messages() {
        let error = ConfigurationError::MissingField {
            id: QuestionId::from(7),
            field: "options",
        };
        assert_eq!(error.to_string(), "question 7 is missing field options");
        assert_eq!(
            ConfigurationError::DuplicateId(QuestionId::from(3)).to_string(),
            "question id 3 is used more than once"
        );
    }
}
