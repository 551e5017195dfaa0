//! Core game logic and state management
//!
//! This module contains the session controller: the linear progression
//! through the catalog, answer grading, the delayed feedback-then-advance
//! transition, restart, and the completion notice sent when the last
//! question is resolved.
//!
//! The controller performs no I/O of its own. Delayed transitions are
//! requested through a `schedule_message` callback and come back through
//! [`Game::receive_alarm`]; snapshots go to a [`Tunnel`]; the completion
//! notice goes to a [`Notifier`].

use std::{fmt::Debug, time::Duration};

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    catalog::{
        Catalog, Prompt, Question, QuestionId, QuestionKind, question::eq_ignore_case,
    },
    constants::feedback::{
        DEFAULT_CELEBRATION_DELAY_MS, DEFAULT_FEEDBACK_DELAY_MS, MAX_DELAY_MS, MIN_DELAY_MS,
    },
    names::PlayerName,
    notify::{self, CompletionNotice, Notifier},
    session::Tunnel,
};

/// The answer that sends the first yes/no question into the dead end
const VETO_ANSWER: &str = "no";

/// Whether the session is still accepting answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Presenting the question at the current index
    Active,
    /// Every question has been resolved
    Finished,
}

/// Feedback shown for the question just answered
///
/// A single value replaces independent display flags, so combinations such
/// as a correct answer and the veto overlay at once cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// No answer is being resolved
    #[default]
    None,
    /// The graded answer matched
    Correct,
    /// The graded answer did not match
    Wrong,
    /// "No" on the first yes/no question; only a restart leaves this state
    InsultWrongFirst,
    /// A free-text answer was recorded
    InputAcknowledged,
}

impl Feedback {
    /// Returns the line shown to the player, if any
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Correct => Some("Correct!"),
            Self::Wrong => Some("Wrong Answer!"),
            Self::InsultWrongFirst => Some(
                "Wrong Answer! But hey, you belong to Google and they will hire you soon!",
            ),
            Self::InputAcknowledged => Some("Thanks for sharing!"),
        }
    }

    /// Whether the feedback window ends in an advance
    pub fn awaits_advance(self) -> bool {
        matches!(self, Self::Correct | Self::Wrong | Self::InputAcknowledged)
    }
}

/// Tag distinguishing one play-through from the next
///
/// Incremented on every restart; alarms issued for an older generation are
/// discarded.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// One submitted answer, kept in question order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The question answered
    pub question_id: QuestionId,
    /// The question text at the time of answering
    pub question_text: String,
    /// The answer as submitted
    pub submitted_answer: String,
}

/// All mutable state of one play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    current_index: usize,
    score: u64,
    answers: Vec<AnswerRecord>,
    phase: Phase,
    feedback: Feedback,
    /// The fun fact of the current question is on screen
    #[serde(default)]
    fun_fact_shown: bool,
    generation: Generation,
}

impl SessionState {
    fn new(generation: Generation) -> Self {
        Self {
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            phase: Phase::Active,
            feedback: Feedback::None,
            fun_fact_shown: false,
            generation,
        }
    }

    /// Index of the question being presented
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Points earned so far
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Answers submitted so far, in question order
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feedback for the question being resolved
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Whether the fun fact of the current question is revealed
    pub fn fun_fact_shown(&self) -> bool {
        self.fun_fact_shown
    }

    /// Generation this state belongs to
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Messages used for scheduled state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Ends the celebration of a correct answer and reveals the fun fact
    RevealFunFact {
        /// Generation the alarm was issued for
        generation: Generation,
        /// Question the feedback belongs to
        index: usize,
    },
    /// Clears the feedback and moves past the question at `index`
    ProceedToNextQuestion {
        /// Generation the alarm was issued for
        generation: Generation,
        /// Question the feedback belongs to
        index: usize,
    },
}

type ValidationResult = garde::Result;

/// Validates that a delay falls within the accepted millisecond bounds
fn validate_delay(val: &Duration, _ctx: &()) -> ValidationResult {
    if (u128::from(MIN_DELAY_MS)..=u128::from(MAX_DELAY_MS)).contains(&val.as_millis()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "outside of bounds [{MIN_DELAY_MS},{MAX_DELAY_MS}] milliseconds",
        )))
    }
}

/// Timing options for the feedback window
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Time the fun fact stays on screen before the next question
    #[garde(custom(validate_delay))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    feedback_delay: Duration,
    /// Time the celebration plays after a correct answer, before the fun fact
    #[garde(custom(validate_delay))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    celebration_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
            celebration_delay: Duration::from_millis(DEFAULT_CELEBRATION_DELAY_MS),
        }
    }
}

impl Options {
    /// Creates options with explicit delays
    pub fn new(feedback_delay: Duration, celebration_delay: Duration) -> Self {
        Self {
            feedback_delay,
            celebration_delay,
        }
    }

    /// Time the fun fact stays on screen
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    /// Time the celebration plays after a correct answer
    pub fn celebration_delay(&self) -> Duration {
        self.celebration_delay
    }
}

/// The presentable part of the question being asked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionMessage {
    /// Question identifier
    pub id: QuestionId,
    /// Ordinal label
    pub level: u32,
    /// Question text
    pub text: String,
    /// What the player may answer with
    pub prompt: Prompt,
}

impl From<&Question> for QuestionMessage {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id(),
            level: question.level(),
            text: question.text().to_owned(),
            prompt: question.prompt(),
        }
    }
}

/// Read-only view of the session, sent to the host view on every change
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Index of the current question
    pub index: usize,
    /// Total number of questions
    pub count: usize,
    /// Points earned so far
    pub score: u64,
    /// Current phase
    pub phase: Phase,
    /// Feedback for the question being resolved
    pub feedback: Feedback,
    /// Line shown for the feedback
    pub feedback_message: Option<&'static str>,
    /// The current question
    pub question: QuestionMessage,
    /// Fun fact, present once revealed and until the next question
    ///
    /// A correct answer reveals it only after the celebration delay.
    pub fun_fact: Option<String>,
    /// `(index + 1) / count`
    pub progress: f64,
    /// The current question is the last one and takes free text
    pub highlight_final_question: bool,
}

impl Snapshot {
    /// Converts the snapshot to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A single-player trivia session
#[derive(Serialize, Deserialize)]
pub struct Game {
    /// Questions in play order
    catalog: Catalog,
    /// Sender of the completion notice
    player_name: PlayerName,
    /// Feedback timing
    options: Options,
    /// The live play-through
    state: SessionState,
}

impl Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("player_name", &self.player_name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a session positioned on the first question
    ///
    /// # Arguments
    ///
    /// * `catalog` - The questions to play, in order
    /// * `player_name` - Name handed over by the landing view
    /// * `options` - Feedback timing
    pub fn new(catalog: Catalog, player_name: PlayerName, options: Options) -> Self {
        Self {
            catalog,
            player_name,
            options,
            state: SessionState::new(Generation::default()),
        }
    }

    /// Returns the live session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the player's name
    pub fn player_name(&self) -> &PlayerName {
        &self.player_name
    }

    /// Returns the catalog being played
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the question at the current index
    ///
    /// The index never leaves the catalog's bounds and the catalog is never
    /// empty, so a question always exists.
    pub fn current_question(&self) -> &Question {
        &self.catalog.questions()[self.state.current_index]
    }

    /// Whether the current question is the last one and takes free text
    ///
    /// Used only to select a presentational highlight.
    pub fn is_final_question_open_ended(&self) -> bool {
        self.state.current_index + 1 == self.catalog.len()
            && self.current_question().is_open_ended()
    }

    /// Submits the player's answer to the current question
    ///
    /// The answer is recorded as given and graded. Unless it trips the
    /// first-question veto, the next step of the feedback window is scheduled
    /// through `schedule_message`: the fun fact reveal after the celebration
    /// for a correct answer, otherwise the advance after the feedback delay.
    ///
    /// The call is ignored when the session is finished, while feedback for
    /// the current question is showing, and for blank free-text answers.
    ///
    /// # Arguments
    ///
    /// * `raw_answer` - The answer as submitted
    /// * `schedule_message` - Function to schedule the next feedback step
    /// * `tunnel` - The host view receiving the new snapshot
    ///
    /// # Returns
    ///
    /// The resulting feedback, or `None` if the call was ignored
    pub fn submit_answer<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        raw_answer: &str,
        mut schedule_message: S,
        tunnel: &T,
    ) -> Option<Feedback> {
        if self.state.phase == Phase::Finished {
            return None;
        }
        if self.state.feedback != Feedback::None {
            log::debug!(
                "Ignoring answer to question {} while {:?} is showing",
                self.state.current_index,
                self.state.feedback
            );
            return None;
        }

        let question = &self.catalog.questions()[self.state.current_index];

        if question.is_open_ended() && raw_answer.trim().is_empty() {
            return None;
        }

        self.state.answers.push(AnswerRecord {
            question_id: question.id(),
            question_text: question.text().to_owned(),
            submitted_answer: raw_answer.to_owned(),
        });

        let vetoed = self.state.current_index == 0
            && matches!(question.kind(), QuestionKind::YesNo { .. })
            && eq_ignore_case(raw_answer, VETO_ANSWER);

        let feedback = if vetoed {
            Feedback::InsultWrongFirst
        } else {
            match question.is_correct(raw_answer) {
                None => Feedback::InputAcknowledged,
                Some(true) => Feedback::Correct,
                Some(false) => Feedback::Wrong,
            }
        };

        if matches!(feedback, Feedback::Correct | Feedback::InputAcknowledged) {
            self.state.score += 1;
        }
        self.state.feedback = feedback;

        log::debug!(
            "Question {} answered: {feedback:?}, score {}",
            question.id(),
            self.state.score
        );

        let generation = self.state.generation;
        let index = self.state.current_index;
        match feedback {
            Feedback::Correct => schedule_message(
                AlarmMessage::RevealFunFact { generation, index },
                self.options.celebration_delay,
            ),
            Feedback::Wrong | Feedback::InputAcknowledged => {
                self.state.fun_fact_shown = true;
                schedule_message(
                    AlarmMessage::ProceedToNextQuestion { generation, index },
                    self.options.feedback_delay,
                );
            }
            Feedback::None | Feedback::InsultWrongFirst => {}
        }

        tunnel.send_state(&self.state_message());

        Some(feedback)
    }

    /// Whether an alarm was issued for the current play-through and question
    fn is_current(&self, generation: Generation, index: usize) -> bool {
        generation == self.state.generation
            && index == self.state.current_index
            && self.state.phase == Phase::Active
    }

    /// Handles a scheduled alarm
    ///
    /// Alarms issued before a restart, or for a question that has already
    /// been left, are dropped.
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm being delivered
    /// * `schedule_message` - Function to schedule the next feedback step
    /// * `tunnel` - The host view receiving the new snapshot
    /// * `notifier` - Receives the completion notice if the session finishes
    pub fn receive_alarm<T: Tunnel, N: Notifier, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        tunnel: &T,
        notifier: &N,
    ) {
        match message {
            AlarmMessage::RevealFunFact { generation, index }
                if self.is_current(generation, index)
                    && self.state.feedback == Feedback::Correct
                    && !self.state.fun_fact_shown =>
            {
                self.state.fun_fact_shown = true;
                schedule_message(
                    AlarmMessage::ProceedToNextQuestion { generation, index },
                    self.options.feedback_delay,
                );
                tunnel.send_state(&self.state_message());
            }
            AlarmMessage::ProceedToNextQuestion { generation, index }
                if self.is_current(generation, index) && self.state.fun_fact_shown =>
            {
                self.advance(tunnel, notifier);
            }
            message => {
                log::debug!("Dropping stale alarm {message:?}");
            }
        }
    }

    /// Moves past an answered question, or finishes after the last one
    ///
    /// Alarms call this once the feedback window ends. A host may call it
    /// directly to cut the window short; it does nothing unless the current
    /// question was answered and is waiting for its advance, so the veto
    /// dead-end and unanswered questions cannot be skipped.
    ///
    /// Finishing sends the completion notice. Once finished, further calls
    /// do nothing, so the notice goes out exactly once per play-through.
    ///
    /// # Arguments
    ///
    /// * `tunnel` - The host view receiving the new snapshot
    /// * `notifier` - Receives the completion notice if the session finishes
    pub fn advance<T: Tunnel, N: Notifier>(&mut self, tunnel: &T, notifier: &N) {
        if self.state.phase == Phase::Finished || !self.state.feedback.awaits_advance() {
            return;
        }

        self.state.feedback = Feedback::None;
        self.state.fun_fact_shown = false;

        if self.state.current_index + 1 < self.catalog.len() {
            self.state.current_index += 1;
            tunnel.send_state(&self.state_message());
        } else {
            self.state.phase = Phase::Finished;
            log::info!(
                "{} finished with score {} of {}",
                self.player_name,
                self.state.score,
                self.catalog.len()
            );
            tunnel.send_state(&self.state_message());
            notify::deliver(
                notifier,
                &CompletionNotice::new(
                    self.player_name.clone(),
                    self.state.score,
                    &self.state.answers,
                ),
            );
        }
    }

    /// Discards the play-through and starts over from the first question
    ///
    /// Any alarm still pending belongs to the previous generation and will be
    /// dropped when it arrives.
    ///
    /// # Arguments
    ///
    /// * `tunnel` - The host view receiving the new snapshot
    pub fn restart<T: Tunnel>(&mut self, tunnel: &T) {
        self.state = SessionState::new(self.state.generation.next());
        log::debug!("Session restarted as generation {}", self.state.generation);
        tunnel.send_state(&self.state_message());
    }

    /// Returns the snapshot of the current state
    pub fn state_message(&self) -> Snapshot {
        let question = self.current_question();
        let count = self.catalog.len();
        Snapshot {
            index: self.state.current_index,
            count,
            score: self.state.score,
            phase: self.state.phase,
            feedback: self.state.feedback,
            feedback_message: self.state.feedback.message(),
            question: question.into(),
            fun_fact: self
                .state
                .fun_fact_shown
                .then(|| question.fun_fact().to_owned()),
            progress: (self.state.current_index + 1) as f64 / count as f64,
            highlight_final_question: self.is_final_question_open_ended(),
        }
    }
}
