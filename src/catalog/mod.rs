//! Question catalog
//!
//! This module contains the question records played in a session and the
//! catalog that holds them. Questions come in three kinds (yes/no, multiple
//! choice, and free text), each with its own answer shape and scoring rule.

pub mod config;
pub mod question;

pub use config::{Catalog, ConfigurationError};
pub use question::{Prompt, Question, QuestionId, QuestionKind};
