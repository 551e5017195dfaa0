//! Completion notification
//!
//! When a session finishes, the administrator receives a notice with the
//! player's name, final score, and every submitted answer. Delivery is
//! fire-and-forget: the outcome is logged and never reaches the session.
//!
//! The transport is supplied by the host through the [`Notifier`] trait.
//! [`EmailRequest`] builds the JSON body expected by the messaging service
//! for hosts that post it themselves.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::notification::{ENDPOINT, PUBLIC_KEY, RECIPIENT, SERVICE_ID, TEMPLATE_ID},
    game::AnswerRecord,
    names::PlayerName,
};

/// Errors reported by a [`Notifier`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The notice could not be handed to the messaging service
    #[error("transport failed: {0}")]
    Transport(String),
    /// The messaging service refused the notice
    #[error("rejected with status {status}")]
    Rejected {
        /// Status code returned by the service
        status: u16,
    },
}

/// The notice sent to the administrator once a session finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionNotice {
    /// Label of the receiving administrator
    pub recipient: String,
    /// The player who finished the session
    pub sender: PlayerName,
    /// Final score
    pub score: u64,
    /// Every answer in question order, see [`format_answers`]
    pub answers: String,
}

impl CompletionNotice {
    /// Assembles the notice for a finished session
    pub fn new(sender: PlayerName, score: u64, answers: &[AnswerRecord]) -> Self {
        Self {
            recipient: RECIPIENT.to_owned(),
            sender,
            score,
            answers: format_answers(answers),
        }
    }
}

/// Concatenates answer records into a single block
///
/// Each record renders as `Q{id}: {question}`, then `Answer: {answer}`,
/// followed by a blank line.
pub fn format_answers(answers: &[AnswerRecord]) -> String {
    answers
        .iter()
        .map(|record| {
            format!(
                "Q{}: {}\nAnswer: {}\n\n",
                record.question_id, record.question_text, record.submitted_answer
            )
        })
        .join("")
}

/// Identifiers of the messaging account used for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NotifierConfig {
    /// URL the [`EmailRequest`] body is posted to
    #[garde(length(min = 1))]
    pub endpoint: String,
    /// Messaging service identifier
    #[garde(length(min = 1))]
    pub service_id: String,
    /// Message template identifier
    #[garde(length(min = 1))]
    pub template_id: String,
    /// Public access key
    #[garde(length(min = 1))]
    pub public_key: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_owned(),
            service_id: SERVICE_ID.to_owned(),
            template_id: TEMPLATE_ID.to_owned(),
            public_key: PUBLIC_KEY.to_owned(),
        }
    }
}

/// Values substituted into the message template
#[derive(Debug, Serialize)]
pub struct TemplateParams<'a> {
    to_name: &'a str,
    from_name: &'a str,
    score: u64,
    answers: &'a str,
}

/// Body of the outbound messaging call
#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

impl<'a> EmailRequest<'a> {
    /// Builds the request for a notice using the account in `config`
    pub fn new(config: &'a NotifierConfig, notice: &'a CompletionNotice) -> Self {
        Self {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: TemplateParams {
                to_name: &notice.recipient,
                from_name: notice.sender.as_str(),
                score: notice.score,
                answers: &notice.answers,
            },
        }
    }

    /// Converts the request to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Trait for delivering completion notices
///
/// Implementations hand the notice to an outbound channel and report
/// whether it was accepted. They must not block on a slow channel; a
/// transport that needs to wait should queue the notice and return.
pub trait Notifier {
    /// Sends the notice
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the channel refused or lost the notice.
    fn send(&self, notice: &CompletionNotice) -> Result<(), Error>;
}

impl<F> Notifier for F
where
    F: Fn(&CompletionNotice) -> Result<(), Error>,
{
    fn send(&self, notice: &CompletionNotice) -> Result<(), Error> {
        self(notice)
    }
}

/// Sends a notice and logs the outcome; failures are not retried
pub(crate) fn deliver<N: Notifier>(notifier: &N, notice: &CompletionNotice) {
    match notifier.send(notice) {
        Ok(()) => log::info!(
            "Completion notice for {} sent to {}.",
            notice.sender,
            notice.recipient
        ),
        Err(e) => log::error!("Completion notice for {} failed: {e}", notice.sender),
    }
}
