//! Error types for snapshot ingestion.

use thiserror::Error;

/// A structurally invalid host snapshot.
///
/// These are the only genuine faults in the policy: every "no candidate
/// found" situation downstream is a normal absent-value outcome, but a
/// snapshot that contradicts itself would make the whole turn meaningless,
/// so board construction refuses it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Map dimensions are zero or beyond the supported coordinate range.
    #[error("unusable map dimensions {width}x{height}")]
    BadDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// A team index outside the two-player range.
    #[error("unknown team {team}")]
    UnknownTeam {
        /// The offending team index.
        team: u8,
    },

    /// No player entry was supplied for a team.
    #[error("missing player entry for team {team}")]
    MissingPlayer {
        /// The team without an entry.
        team: u8,
    },

    /// An entity references a cell outside the map.
    #[error("{entity} at ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        /// What kind of entity was misplaced.
        entity: &'static str,
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
    },

    /// Two cell-occupying entries claim the same tile.
    #[error("cell ({x}, {y}) is claimed twice")]
    CellConflict {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },

    /// Two units share one identifier.
    #[error("duplicate unit id {id}")]
    DuplicateUnit {
        /// The repeated unit id.
        id: u32,
    },
}
