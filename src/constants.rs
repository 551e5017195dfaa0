//! Configuration constants for the trivia game
//!
//! This module contains the limits used to validate a question catalog,
//! the default feedback timings, and the fixed identifiers of the
//! completion notification.

/// Question catalog limits
pub mod catalog {
    /// Maximum number of questions in a single catalog
    pub const MAX_QUESTION_COUNT: usize = 100;
    /// Maximum length of a question's display text in characters
    pub const MAX_QUESTION_LENGTH: usize = 300;
    /// Minimum number of options offered by a multiple choice question
    pub const MIN_OPTION_COUNT: usize = 2;
    /// Maximum number of options offered by a multiple choice question
    pub const MAX_OPTION_COUNT: usize = 8;
    /// Maximum length of the fun fact shown after a question is resolved
    pub const MAX_FUN_FACT_LENGTH: usize = 500;
}

/// Answer text configuration
pub mod answer_text {
    /// Maximum length of an option or an expected answer
    pub const MAX_LENGTH: usize = 200;
}

/// Feedback timing configuration, in milliseconds
pub mod feedback {
    /// Time the fun fact stays on screen before the next question
    pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 3000;
    /// Time the celebration effect plays after a correct answer, before the fun fact
    pub const DEFAULT_CELEBRATION_DELAY_MS: u64 = 800;
    /// Smallest accepted delay
    pub const MIN_DELAY_MS: u64 = 0;
    /// Largest accepted delay
    pub const MAX_DELAY_MS: u64 = 10_000;
}

/// Player name configuration
pub mod player {
    /// Name used when the landing view did not hand one over
    pub const DEFAULT_NAME: &str = "Guest";
    /// Maximum length of a player name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
}

/// Completion notification configuration
pub mod notification {
    /// Label of the administrator receiving the completion notice
    pub const RECIPIENT: &str = "Admin";
    /// Messaging service identifier
    pub const SERVICE_ID: &str = "service_ga194k4";
    /// Message template identifier
    pub const TEMPLATE_ID: &str = "template_geqnw89";
    /// Public access key of the messaging account
    pub const PUBLIC_KEY: &str = "9C0d12Bv9KHG4FTt6";
    /// Default URL the completion notice request is posted to
    pub const ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
}
