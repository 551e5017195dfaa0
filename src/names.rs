//! Player name handling
//!
//! The landing view collects a display name and hands it to the game view
//! through navigation. This module validates the name on the landing side
//! and recovers a usable name on the game side, where the parameter may be
//! missing or tampered with.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::player::{DEFAULT_NAME, MAX_NAME_LENGTH};

/// Errors that can occur while validating a player name
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// The player's display name, used as the sender of the completion notice
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates a name typed into the landing form
    ///
    /// Surrounding whitespace is removed before any check.
    ///
    /// # Errors
    ///
    /// * `Error::Empty` - Name is empty after trimming whitespace
    /// * `Error::TooLong` - Name exceeds the maximum length in characters
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Empty);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(Error::TooLong);
        }
        Ok(Self(name.to_owned()))
    }

    /// Recovers the name handed over by navigation
    ///
    /// Any non-blank name is kept as given; the length limit applies to the
    /// landing form only. Falls back to the placeholder name when the
    /// parameter is absent or blank.
    pub fn from_query(name: Option<&str>) -> Self {
        name.filter(|name| !name.trim().is_empty())
            .map(|name| Self(name.to_owned()))
            .unwrap_or_default()
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the banner shown when the game view is entered
    pub fn welcome_message(&self) -> String {
        format!("Welcome, {self}! Get ready for the challenge!")
    }
}

impl Default for PlayerName {
    /// The placeholder name used when none was supplied
    fn default() -> Self {
        Self(DEFAULT_NAME.to_owned())
    }
}

impl Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let name = PlayerName::new("  Ada Lovelace \n").unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_new_empty() {
        assert_eq!(PlayerName::new(""), Err(Error::Empty));
        assert_eq!(PlayerName::new("   \t"), Err(Error::Empty));
    }

    #[test]
    fn test_new_too_long() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(PlayerName::new(&name), Err(Error::TooLong));

        let name = "a".repeat(MAX_NAME_LENGTH);
        assert!(PlayerName::new(&name).is_ok());
    }

    #[test]
    fn test_new_counts_characters() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert!(PlayerName::new(&name).is_ok());
    }

    #[test]
    fn test_from_query() {
        assert_eq!(PlayerName::from_query(Some("Grace")).as_str(), "Grace");
        assert_eq!(PlayerName::from_query(None).as_str(), DEFAULT_NAME);
        assert_eq!(PlayerName::from_query(Some("  ")).as_str(), DEFAULT_NAME);
        assert_eq!(PlayerName::from_query(Some("")).as_str(), DEFAULT_NAME);
    }

    #[test]
    fn test_from_query_keeps_long_name() {
        let name = "Maximilian Alexander von Hohenberg";
        assert!(name.chars().count() > MAX_NAME_LENGTH);
        assert_eq!(PlayerName::from_query(Some(name)).as_str(), name);
        assert_eq!(PlayerName::new(name), Err(Error::TooLong));
    }

    #[test]
    fn test_welcome_message() {
        let name = PlayerName::new("Linus").unwrap();
        assert_eq!(
            name.welcome_message(),
            "Welcome, Linus! Get ready for the challenge!"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Empty.to_string(), "name cannot be empty");
        assert_eq!(Error::TooLong.to_string(), "name is too long");
    }
}
