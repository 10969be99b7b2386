// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Lumen: a greedy turn-policy engine for day/night grid resource games.
//!
//! Two teams of pawns compete on a shared grid for fuel resources while a
//! 30-move day / 10-move night cycle threatens their cities with
//! starvation. Each turn the host hands this crate a full snapshot and
//! gets back one action per controllable unit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Turn Policy (Session)        │
//! ├──────────────┬──────────────────────┤
//! │ Fuel Forecast│ Reachability Queries │
//! ├──────────────┴──────────────────────┤
//! │      Move Broker (reservations)     │
//! ├─────────────────────────────────────┤
//! │     Board Snapshot (per turn)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! The board view is rebuilt from the host snapshot every turn; the only
//! cross-turn state is the [`Session`]: a turn counter and the lead pawn's
//! scouting targets.

pub mod action;
pub mod board;
pub mod error;
pub mod policy;

pub use action::{Action, Annotation, TurnOutput};
pub use error::SnapshotError;

// Re-export key types at crate root for convenience
pub use board::{Board, Direction, Pawn, Position, ResourceKind, Snapshot, Team, Tile};
pub use policy::{MoveBroker, PolicyConfig, Session};
