//! Question records and answer evaluation
//!
//! A question is one of three kinds: a yes/no question, a multiple choice
//! question, or an open-ended question answered with free text. Records are
//! deserialized through [`QuestionSerde`] so that every structural problem
//! (unknown kind, missing field, an answer that can never match) is reported
//! as a [`ConfigurationError`] while the catalog loads.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::constants::{
    answer_text,
    catalog::{MAX_FUN_FACT_LENGTH, MAX_OPTION_COUNT, MAX_QUESTION_LENGTH, MIN_OPTION_COUNT},
};

use super::config::ConfigurationError;

/// Answers offered by a yes/no question, in display order
pub const YES_NO_CHOICES: [&str; 2] = ["yes", "no"];

/// A stable identifier for a question within a catalog
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct QuestionId(u32);

/// The shape of the answer a question accepts and how it is scored
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub enum QuestionKind {
    /// Answered with "yes" or "no"
    YesNo {
        /// The expected answer, either "yes" or "no" in any case
        #[garde(length(chars, max = answer_text::MAX_LENGTH))]
        answer: String,
    },
    /// Answered by picking one of the options
    MultipleChoice {
        /// Options in display order
        #[garde(
            length(min = MIN_OPTION_COUNT, max = MAX_OPTION_COUNT),
            inner(length(chars, min = 1, max = answer_text::MAX_LENGTH))
        )]
        options: Vec<String>,
        /// The expected answer, matching one of the options
        #[garde(length(chars, max = answer_text::MAX_LENGTH))]
        answer: String,
    },
    /// Answered with free text; every non-blank answer scores
    Input,
}

impl QuestionKind {
    /// The wire tag of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::YesNo { .. } => "yesno",
            Self::MultipleChoice { .. } => "mcq",
            Self::Input => "input",
        }
    }

    /// Splits the kind into its wire fields: options and expected answer
    fn into_parts(self) -> (Option<Vec<String>>, Option<String>) {
        match self {
            Self::YesNo { answer } => (None, Some(answer)),
            Self::MultipleChoice { options, answer } => (Some(options), Some(answer)),
            Self::Input => (None, None),
        }
    }

    /// The expected answer, or `None` for open-ended questions
    pub fn expected_answer(&self) -> Option<&str> {
        match self {
            Self::YesNo { answer } | Self::MultipleChoice { answer, .. } => Some(answer),
            Self::Input => None,
        }
    }
}

/// What the presentation layer should offer the player for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Prompt {
    /// One button per choice; pressing it submits the choice verbatim
    Choices(Vec<String>),
    /// A text field whose submit control stays disabled while blank
    FreeText,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(try_from = "QuestionSerde", into = "QuestionSerde")]
pub struct Question {
    /// Unique within the catalog
    #[garde(skip)]
    id: QuestionId,
    /// Ordinal label shown above the question
    #[garde(skip)]
    level: u32,
    /// The question text
    #[garde(length(chars, min = 1, max = MAX_QUESTION_LENGTH))]
    question: String,
    /// Accepted answer shape and scoring rule
    #[garde(dive)]
    kind: QuestionKind,
    /// Shown once the question is resolved
    #[garde(length(chars, max = MAX_FUN_FACT_LENGTH))]
    fun_fact: String,
}

/// Wire form of a [`Question`], as found in the catalog file
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionSerde {
    pub(crate) id: QuestionId,
    level: Option<u32>,
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
    options: Option<Vec<String>>,
    answer: Option<String>,
    fun_fact: Option<String>,
}

impl TryFrom<QuestionSerde> for Question {
    type Error = ConfigurationError;

    fn try_from(serde: QuestionSerde) -> Result<Self, Self::Error> {
        let QuestionSerde {
            id,
            level,
            kind,
            question,
            options,
            answer,
            fun_fact,
        } = serde;

        let missing = |field: &'static str| ConfigurationError::MissingField { id, field };

        let kind = match kind.ok_or_else(|| missing("type"))?.as_str() {
            "yesno" => {
                let answer = answer.ok_or_else(|| missing("answer"))?;
                if !YES_NO_CHOICES
                    .iter()
                    .any(|choice| eq_ignore_case(choice, &answer))
                {
                    return Err(ConfigurationError::UnexpectedYesNoAnswer { id });
                }
                QuestionKind::YesNo { answer }
            }
            "mcq" => {
                let options = options.ok_or_else(|| missing("options"))?;
                let answer = answer.ok_or_else(|| missing("answer"))?;
                if !options.iter().any(|option| eq_ignore_case(option, &answer)) {
                    return Err(ConfigurationError::AnswerNotAnOption { id });
                }
                QuestionKind::MultipleChoice { options, answer }
            }
            "input" => QuestionKind::Input,
            other => {
                return Err(ConfigurationError::UnknownType {
                    id,
                    kind: other.to_owned(),
                });
            }
        };

        Ok(Self {
            id,
            level: level.ok_or_else(|| missing("level"))?,
            question: question.ok_or_else(|| missing("question"))?,
            kind,
            fun_fact: fun_fact.ok_or_else(|| missing("funFact"))?,
        })
    }
}

impl From<Question> for QuestionSerde {
    fn from(question: Question) -> Self {
        let Question {
            id,
            level,
            question,
            kind,
            fun_fact,
        } = question;
        let tag = kind.tag().to_owned();
        let (options, answer) = kind.into_parts();
        Self {
            id,
            level: Some(level),
            kind: Some(tag),
            question: Some(question),
            options,
            answer,
            fun_fact: Some(fun_fact),
        }
    }
}

/// Case-insensitive exact comparison used for every graded answer
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

impl Question {
    /// Creates a question from its parts
    ///
    /// Structural checks (yes/no answers, multiple choice answers matching an
    /// option) are applied the same way as when loading from JSON; length
    /// limits are checked by [`super::Catalog::new`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the answer can never be matched.
    pub fn new(
        id: u32,
        level: u32,
        question: impl Into<String>,
        kind: QuestionKind,
        fun_fact: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let tag = kind.tag().to_owned();
        let (options, answer) = kind.into_parts();
        Self::try_from(QuestionSerde {
            id: QuestionId(id),
            level: Some(level),
            kind: Some(tag),
            question: Some(question.into()),
            options,
            answer,
            fun_fact: Some(fun_fact.into()),
        })
    }

    /// Returns the question's identifier
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the ordinal display label
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the question text
    pub fn text(&self) -> &str {
        &self.question
    }

    /// Returns the question kind
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Returns the fun fact revealed after the question is resolved
    pub fn fun_fact(&self) -> &str {
        &self.fun_fact
    }

    /// Whether the question is answered with free text
    pub fn is_open_ended(&self) -> bool {
        matches!(self.kind, QuestionKind::Input)
    }

    /// Returns the affordance the presentation layer renders for this question
    pub fn prompt(&self) -> Prompt {
        match &self.kind {
            QuestionKind::YesNo { .. } => Prompt::Choices(
                YES_NO_CHOICES
                    .iter()
                    .map(ToString::to_string)
                    .collect_vec(),
            ),
            QuestionKind::MultipleChoice { options, .. } => Prompt::Choices(options.clone()),
            QuestionKind::Input => Prompt::FreeText,
        }
    }

    /// Grades a submitted answer
    ///
    /// # Returns
    ///
    /// `Some(true)` on a case-insensitive exact match with the expected
    /// answer, `Some(false)` otherwise, and `None` for open-ended questions,
    /// which are not graded.
    pub fn is_correct(&self, raw_answer: &str) -> Option<bool> {
        self.kind
            .expected_answer()
            .map(|expected| eq_ignore_case(expected, raw_answer))
    }
}
