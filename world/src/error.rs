//! Unrecoverable match setup failures.

use ascifight_core::{ActorId, Coordinates, TeamName};
use thiserror::Error;

/// Reasons a match can not be set up.
///
/// These abort match creation; rejected actions during play are reported
/// through the rejection enums of `ascifight_core` instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The configured map size is zero.
    #[error("map size must be positive")]
    InvalidMapSize,
    /// The configured map size exceeds the supported edge length.
    #[error("map size {size} exceeds the maximum of {maximum}")]
    MapTooLarge {
        /// Configured edge length.
        size: u32,
        /// Largest supported edge length.
        maximum: u32,
    },
    /// The board is too small to hold disjoint starting regions.
    #[error("map size {size} is too small for starting regions, need at least {minimum}")]
    MapTooSmall {
        /// Configured edge length.
        size: u32,
        /// Smallest supported edge length.
        minimum: u32,
    },
    /// More teams were requested than starting regions exist.
    #[error("{teams} teams requested but only {regions} starting regions exist")]
    TooManyTeams {
        /// Number of teams requested.
        teams: usize,
        /// Number of available starting regions.
        regions: usize,
    },
    /// Not enough free tiles around a base for the requested actors.
    #[error("{requested} actors requested but only {available} tiles are free around the base")]
    TooManyActors {
        /// Number of actors requested.
        requested: usize,
        /// Number of free tiles in the spawn radius.
        available: usize,
    },
    /// Not enough tiles outside the base exclusion zones for the requested walls.
    #[error("{requested} walls requested but only {available} tiles are eligible")]
    NotEnoughWallTiles {
        /// Number of walls requested.
        requested: usize,
        /// Number of eligible tiles.
        available: usize,
    },
    /// Bases are drawn once for all teams of a match.
    #[error("bases have already been placed")]
    BasesAlreadyPlaced,
    /// Walls are fixed once placed for a match.
    #[error("walls have already been placed")]
    WallsAlreadyPlaced,
    /// The team has no base on the board.
    #[error("team {0} has no base")]
    UnknownTeam(TeamName),
    /// The team was registered twice.
    #[error("team {0} is already on the board")]
    DuplicateTeam(TeamName),
    /// The actor was registered twice.
    #[error("actor {0} is already on the board")]
    DuplicateActor(ActorId),
    /// A layout entry lies outside the board.
    #[error("coordinates {0} are outside the board")]
    OutOfBounds(Coordinates),
    /// Two exclusive layout entries share a tile.
    #[error("coordinates {0} are occupied more than once")]
    Overlap(Coordinates),
}
