//! # Trivia Game Library
//!
//! This library provides the core logic of a single-player trivia game: a
//! linear run through a question catalog with scoring, scripted feedback,
//! restart, and a completion notice sent to an administrator.
//!
//! The library performs no I/O. Timers, rendering and message delivery are
//! supplied by the host through callbacks and the [`session::Tunnel`] and
//! [`notify::Notifier`] traits.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod constants;
pub mod game;
pub mod names;
pub mod notify;
pub mod session;

pub use catalog::{Catalog, ConfigurationError, Question, QuestionKind};
pub use game::{AlarmMessage, Feedback, Game, Options, Phase, Snapshot};
pub use names::PlayerName;
pub use notify::{CompletionNotice, Notifier};
pub use session::Tunnel;
