#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the ASCI-Fight engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired actions, the board executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! happened. Systems consume immutable [`BoardSnapshot`] values and respond
//! exclusively with new command batches.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod geometry;

pub use geometry::{Coordinates, Direction, DirectionCandidates, MapSize};

/// Name that identifies a team, its flag, and its base.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a team name from the provided text.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrows the underlying name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participating team.
///
/// Equality and hashing only consider the name; `number` drives display
/// ordering for adapters and carries no rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    /// Identity of the team.
    pub name: TeamName,
    /// Display ordering used by renderers.
    pub number: u32,
}

impl Team {
    /// Creates a new team.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: TeamName::new(name),
            number,
        }
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Team {}

impl std::hash::Hash for Team {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Types of actors a team may field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    /// Can grab flags and attack.
    Generalist,
    /// Can grab flags but never attacks.
    Runner,
    /// Can attack but never carries a flag.
    Attacker,
    /// Neither grabs nor attacks; only gets in the way.
    Blocker,
}

impl ActorKind {
    /// Capability probabilities fixed by the actor type.
    #[must_use]
    pub const fn properties(self) -> ActorProperties {
        match self {
            Self::Generalist => ActorProperties::new(1.0, 1.0),
            Self::Runner => ActorProperties::new(1.0, 0.0),
            Self::Attacker => ActorProperties::new(0.0, 1.0),
            Self::Blocker => ActorProperties::new(0.0, 0.0),
        }
    }
}

/// Probabilities describing what an actor type is able to do.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorProperties {
    /// Probability to successfully grab or put a flag. Zero means the actor
    /// can never carry one, not even when handed over.
    pub grab: f64,
    /// Probability to successfully attack. Zero means the actor cannot attack.
    pub attack: f64,
}

impl ActorProperties {
    /// Creates a new capability pair.
    #[must_use]
    pub const fn new(grab: f64, attack: f64) -> Self {
        Self { grab, attack }
    }

    /// Reports whether the actor is able to hold a flag.
    #[must_use]
    pub fn can_grab(&self) -> bool {
        self.grab > 0.0
    }

    /// Reports whether the actor is able to attack.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack > 0.0
    }
}

/// Identifies an actor by its team and sequential number within the team.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    /// Team the actor plays for.
    pub team: TeamName,
    /// Sequential number within the team.
    pub ident: u32,
}

impl ActorId {
    /// Creates a new actor identifier.
    #[must_use]
    pub fn new(team: TeamName, ident: u32) -> Self {
        Self { team, ident }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team, self.ident)
    }
}

/// Anything that can be found on a board tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardObject {
    /// Home base of the named team.
    Base(TeamName),
    /// Actor standing on the tile.
    Actor(ActorId),
    /// Flag of the named team, lying free or carried by the actor on the tile.
    Flag(TeamName),
    /// Impassable wall.
    Wall,
}

/// Commands that express all permissible board actions during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that an actor step one tile.
    Move {
        /// Actor attempting to move.
        actor: ActorId,
        /// Direction of travel.
        direction: Direction,
    },
    /// Requests that an actor pick up a flag from a neighbouring tile.
    Grab {
        /// Actor attempting to grab.
        actor: ActorId,
        /// Direction of the tile holding the flag.
        direction: Direction,
    },
    /// Requests that an actor put down or hand over its flag.
    Put {
        /// Actor carrying the flag.
        actor: ActorId,
        /// Direction of the receiving tile.
        direction: Direction,
    },
    /// Requests that an actor attack whoever stands on a neighbouring tile.
    Attack {
        /// Attacking actor.
        actor: ActorId,
        /// Direction of the attacked tile.
        direction: Direction,
    },
    /// Removes an actor from play and places it back near its base.
    Respawn {
        /// Actor to relocate.
        actor: ActorId,
    },
    /// Sends a flag back to its owner's base.
    ReturnFlag {
        /// Owner of the flag.
        flag: TeamName,
    },
}

/// Events reported by the board after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that an actor moved between two tiles.
    ActorMoved {
        /// Actor that moved.
        actor: ActorId,
        /// Tile occupied before moving.
        from: Coordinates,
        /// Tile occupied after moving.
        to: Coordinates,
    },
    /// Reports that a move request was rejected and nothing changed.
    MoveRejected {
        /// Actor that attempted the move.
        actor: ActorId,
        /// Requested direction.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that an actor picked up a flag.
    FlagGrabbed {
        /// Actor now carrying the flag.
        actor: ActorId,
        /// Owner of the grabbed flag.
        flag: TeamName,
        /// Previous carrier when the flag was taken from another actor.
        from: Option<ActorId>,
    },
    /// Reports that a grab request was rejected.
    GrabRejected {
        /// Actor that attempted the grab.
        actor: ActorId,
        /// Specific reason the grab failed.
        reason: GrabRejection,
    },
    /// Confirms that a flag was put down or handed over.
    FlagPut {
        /// Actor that carried the flag.
        actor: ActorId,
        /// Owner of the flag.
        flag: TeamName,
        /// Actor receiving the flag, if it was handed over.
        recipient: Option<ActorId>,
        /// Tile the flag now occupies.
        coordinates: Coordinates,
    },
    /// Confirms that a flag was delivered to the carrier's own base.
    FlagScored {
        /// Actor that delivered the flag.
        actor: ActorId,
        /// Owner of the captured flag.
        flag: TeamName,
    },
    /// Reports that a put request was rejected.
    PutRejected {
        /// Actor that attempted the put.
        actor: ActorId,
        /// Specific reason the put failed.
        reason: PutRejection,
    },
    /// Confirms a successful attack. The victim's respawn is reported separately.
    ActorAttacked {
        /// Attacking actor.
        attacker: ActorId,
        /// Actor that was hit.
        target: ActorId,
    },
    /// Reports that an attack request was rejected.
    AttackRejected {
        /// Actor that attempted the attack.
        actor: ActorId,
        /// Specific reason the attack failed.
        reason: AttackRejection,
    },
    /// Confirms that an actor was relocated near its base.
    ActorRespawned {
        /// Actor that respawned.
        actor: ActorId,
        /// Tile occupied before respawning.
        from: Coordinates,
        /// Tile occupied after respawning.
        to: Coordinates,
        /// Flag the actor dropped at `from`, if it carried one.
        dropped_flag: Option<TeamName>,
    },
    /// Reports that a respawn could not be performed.
    RespawnRejected {
        /// Actor that should have respawned.
        actor: ActorId,
        /// Specific reason the respawn failed.
        reason: RespawnError,
    },
    /// Confirms that a flag was sent back to its base.
    FlagReturned {
        /// Owner of the flag.
        flag: TeamName,
        /// Base coordinates the flag now occupies.
        to: Coordinates,
    },
}

/// Reasons a move request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MoveRejection {
    /// No actor with the provided identifier is on the board.
    #[error("actor is not on the board")]
    UnknownActor,
    /// The board edge absorbed the step.
    #[error("target field is out of bounds")]
    OutOfBounds,
    /// Another actor stands on the target tile.
    #[error("target field is occupied")]
    Occupied,
    /// A base sits on the target tile.
    #[error("target field is a base")]
    Base,
    /// A wall sits on the target tile.
    #[error("target field is a wall")]
    Wall,
}

/// Reasons a grab request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum GrabRejection {
    /// No actor with the provided identifier is on the board.
    #[error("actor is not on the board")]
    UnknownActor,
    /// The actor type can never hold a flag.
    #[error("actor can not grab flags")]
    CannotGrab,
    /// The actor already carries a flag.
    #[error("actor already carries a flag")]
    AlreadyCarrying,
    /// The board edge absorbed the target tile.
    #[error("target field is out of bounds")]
    OutOfBounds,
    /// There is no flag on the target tile.
    #[error("no flag on the target field")]
    NoFlag,
    /// The grab roll missed.
    #[error("grab attempt failed")]
    Failed,
}

/// Reasons a put request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PutRejection {
    /// No actor with the provided identifier is on the board.
    #[error("actor is not on the board")]
    UnknownActor,
    /// The actor carries no flag.
    #[error("actor carries no flag")]
    NotCarrying,
    /// The board edge absorbed the target tile.
    #[error("target field is out of bounds")]
    OutOfBounds,
    /// The target tile can not receive the flag.
    #[error("target field can not take the flag")]
    Blocked,
    /// The put roll missed.
    #[error("put attempt failed")]
    Failed,
}

/// Reasons an attack request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AttackRejection {
    /// No actor with the provided identifier is on the board.
    #[error("actor is not on the board")]
    UnknownActor,
    /// The actor type can not attack.
    #[error("actor can not attack")]
    CannotAttack,
    /// Nobody stands on the target tile.
    #[error("no actor on the target field")]
    NoTarget,
    /// The actor on the target tile belongs to the same team.
    #[error("target actor is a team mate")]
    FriendlyFire,
    /// The attack roll missed.
    #[error("attack failed")]
    Failed,
    /// The victim was hit but no free tile exists near its base.
    #[error("target could not be respawned: {0}")]
    Respawn(RespawnError),
}

/// Reasons a respawn may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum RespawnError {
    /// No actor with the provided identifier is on the board.
    #[error("actor is not on the board")]
    UnknownActor,
    /// The actor's team has no base.
    #[error("actor's team has no base")]
    MissingBase,
    /// Every tile within the spawn radius is taken.
    #[error("no free field near the base")]
    NoFreeTile,
}

/// Immutable representation of an actor used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Identity of the actor.
    pub id: ActorId,
    /// Type of the actor.
    pub kind: ActorKind,
    /// Tile the actor stands on.
    pub coordinates: Coordinates,
    /// Owner of the flag the actor carries, if any.
    pub flag: Option<TeamName>,
}

/// Immutable representation of a flag used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    /// Owner of the flag.
    pub team: TeamName,
    /// Tile the flag occupies, its carrier's tile when carried.
    pub coordinates: Coordinates,
    /// Actor carrying the flag, if any.
    pub carrier: Option<ActorId>,
}

/// Immutable representation of a base used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSnapshot {
    /// Owner of the base.
    pub team: TeamName,
    /// Tile the base occupies.
    pub coordinates: Coordinates,
}

/// Point-in-time copy of the board used as pathfinding input.
///
/// A snapshot describes exactly one tick; directions computed from it become
/// stale as soon as the board applies the next batch of commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Edge length of the board.
    pub map_size: MapSize,
    /// Actors sorted by identifier.
    pub actors: Vec<ActorSnapshot>,
    /// Flags sorted by owner.
    pub flags: Vec<FlagSnapshot>,
    /// Bases sorted by owner.
    pub bases: Vec<BaseSnapshot>,
    /// Wall tiles in ascending order.
    pub walls: Vec<Coordinates>,
}

impl BoardSnapshot {
    /// Looks up an actor in the snapshot.
    #[must_use]
    pub fn actor(&self, id: &ActorId) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|actor| &actor.id == id)
    }

    /// Looks up a flag in the snapshot.
    #[must_use]
    pub fn flag(&self, team: &TeamName) -> Option<&FlagSnapshot> {
        self.flags.iter().find(|flag| &flag.team == team)
    }

    /// Looks up a base in the snapshot.
    #[must_use]
    pub fn base(&self, team: &TeamName) -> Option<&BaseSnapshot> {
        self.bases.iter().find(|base| &base.team == team)
    }

    /// Tiles that block `actor` during a search: every other actor, every base
    /// and every wall.
    #[must_use]
    pub fn obstacles_for(&self, actor: &ActorId) -> HashSet<Coordinates> {
        self.actors
            .iter()
            .filter(|other| &other.id != actor)
            .map(|other| other.coordinates)
            .chain(self.bases.iter().map(|base| base.coordinates))
            .chain(self.walls.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(team: &str, ident: u32, x: u32, y: u32) -> ActorSnapshot {
        ActorSnapshot {
            id: ActorId::new(TeamName::new(team), ident),
            kind: ActorKind::Generalist,
            coordinates: Coordinates::new(x, y),
            flag: None,
        }
    }

    fn snapshot() -> BoardSnapshot {
        BoardSnapshot {
            map_size: MapSize::new(8).expect("non-empty map"),
            actors: vec![actor("red", 0, 1, 1), actor("blue", 0, 5, 5)],
            flags: vec![FlagSnapshot {
                team: TeamName::new("blue"),
                coordinates: Coordinates::new(6, 6),
                carrier: None,
            }],
            bases: vec![
                BaseSnapshot {
                    team: TeamName::new("red"),
                    coordinates: Coordinates::new(1, 2),
                },
                BaseSnapshot {
                    team: TeamName::new("blue"),
                    coordinates: Coordinates::new(6, 6),
                },
            ],
            walls: vec![Coordinates::new(3, 3)],
        }
    }

    #[test]
    fn actor_kinds_carry_fixed_capabilities() {
        assert!(ActorKind::Generalist.properties().can_grab());
        assert!(ActorKind::Generalist.properties().can_attack());
        assert!(ActorKind::Runner.properties().can_grab());
        assert!(!ActorKind::Runner.properties().can_attack());
        assert!(!ActorKind::Attacker.properties().can_grab());
        assert!(ActorKind::Attacker.properties().can_attack());
        assert!(!ActorKind::Blocker.properties().can_grab());
        assert!(!ActorKind::Blocker.properties().can_attack());
    }

    #[test]
    fn teams_compare_by_name_only() {
        assert_eq!(Team::new("red", 0), Team::new("red", 3));
        assert_ne!(Team::new("red", 0), Team::new("blue", 0));
    }

    #[test]
    fn obstacles_exclude_the_routed_actor() {
        let snapshot = snapshot();
        let me = ActorId::new(TeamName::new("red"), 0);
        let obstacles = snapshot.obstacles_for(&me);

        assert!(!obstacles.contains(&Coordinates::new(1, 1)));
        assert!(obstacles.contains(&Coordinates::new(5, 5)));
        assert!(obstacles.contains(&Coordinates::new(1, 2)));
        assert!(obstacles.contains(&Coordinates::new(6, 6)));
        assert!(obstacles.contains(&Coordinates::new(3, 3)));
        assert_eq!(obstacles.len(), 4);
    }

    #[test]
    fn snapshot_survives_bincode() {
        let snapshot = snapshot();
        let bytes = bincode::serialize(&snapshot).expect("serialize");
        let restored: BoardSnapshot = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn rejection_messages_name_the_reason() {
        assert_eq!(MoveRejection::Wall.to_string(), "target field is a wall");
        assert_eq!(
            AttackRejection::Respawn(RespawnError::NoFreeTile).to_string(),
            "target could not be respawned: no free field near the base"
        );
    }
}
