//! Presentation boundary
//!
//! This module defines the trait through which the controller pushes state
//! snapshots to the host view. The view renders purely from the snapshot and
//! calls back into [`crate::game::Game`]; it owns no game logic.

use super::game::Snapshot;

/// Trait for sending state snapshots to the host view
pub trait Tunnel {
    /// Sends the snapshot taken after a state change
    ///
    /// # Arguments
    ///
    /// * `state` - The snapshot to render
    fn send_state(&self, state: &Snapshot);
}
