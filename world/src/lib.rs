#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for ASCI-Fight.
//!
//! The [`Board`] is the single source of truth for what occupies which tile
//! and the only place positions are mutated. Occupancy lookups are derived on
//! demand from the entity-to-coordinate maps.

use std::collections::{BTreeMap, BTreeSet};

use ascifight_core::{
    geometry, ActorId, ActorKind, AttackRejection, Command, Coordinates, Direction, Event,
    GrabRejection, MapSize, MoveRejection, PutRejection, RespawnError, Team, TeamName,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

mod config;
mod error;
mod layout;
mod placement;

pub use config::{ConfigError, GameConfig, MAX_MAP_SIZE};
pub use error::SetupError;
pub use layout::{ActorLayout, Layout, LayoutError, TeamLayout};

/// Actor waiting to be placed on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorSeed {
    /// Identity of the actor.
    pub id: ActorId,
    /// Type of the actor.
    pub kind: ActorKind,
}

impl ActorSeed {
    /// Creates a new actor seed.
    #[must_use]
    pub fn new(id: ActorId, kind: ActorKind) -> Self {
        Self { id, kind }
    }
}

/// Tiles involved in a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Moved {
    /// Tile occupied before moving.
    pub from: Coordinates,
    /// Tile occupied after moving.
    pub to: Coordinates,
}

/// Outcome of a successful respawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Respawned {
    /// Tile occupied before respawning; a carried flag is dropped here.
    pub from: Coordinates,
    /// Tile occupied after respawning.
    pub to: Coordinates,
    /// Flag the actor was carrying, if any. It stays on `from` unless another
    /// free flag already lies there, in which case it returns to its base.
    pub dropped_flag: Option<TeamName>,
}

/// Outcome of a successful grab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grabbed {
    /// Owner of the grabbed flag.
    pub flag: TeamName,
    /// Previous carrier when the flag was taken from another actor.
    pub from: Option<ActorId>,
}

/// Outcome of a successful put.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    /// The flag now lies on a free tile.
    Dropped {
        /// Owner of the flag.
        flag: TeamName,
        /// Tile the flag lies on.
        coordinates: Coordinates,
    },
    /// The flag was handed to another actor.
    HandedOver {
        /// Owner of the flag.
        flag: TeamName,
        /// New carrier.
        recipient: ActorId,
        /// Tile of the new carrier.
        coordinates: Coordinates,
    },
    /// The flag was delivered to the carrier's own base and returned home.
    Scored {
        /// Owner of the captured flag.
        flag: TeamName,
    },
}

/// Outcome of a successful attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attacked {
    /// Actor that was hit.
    pub target: ActorId,
    /// Respawn applied to the victim.
    pub respawn: Respawned,
}

#[derive(Clone, Copy, Debug)]
struct ActorState {
    kind: ActorKind,
    coordinates: Coordinates,
}

/// Where a flag currently is. A carried flag has no position of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
enum FlagPosition {
    Grid(Coordinates),
    Carried(ActorId),
}

/// Represents the authoritative ASCI-Fight board state.
#[derive(Debug)]
pub struct Board {
    map_size: MapSize,
    config: GameConfig,
    rng: ChaCha8Rng,
    teams: Vec<Team>,
    actors: BTreeMap<ActorId, ActorState>,
    flags: BTreeMap<TeamName, FlagPosition>,
    bases: BTreeMap<TeamName, Coordinates>,
    walls: BTreeSet<Coordinates>,
}

impl Board {
    /// Creates an empty board for the provided configuration.
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        if config.map_size > MAX_MAP_SIZE {
            return Err(SetupError::MapTooLarge {
                size: config.map_size,
                maximum: MAX_MAP_SIZE,
            });
        }
        let map_size = MapSize::new(config.map_size).ok_or(SetupError::InvalidMapSize)?;
        Ok(Self {
            map_size,
            config: config.clone(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            teams: Vec::new(),
            actors: BTreeMap::new(),
            flags: BTreeMap::new(),
            bases: BTreeMap::new(),
            walls: BTreeSet::new(),
        })
    }

    /// Creates a board holding exactly the provided layout.
    ///
    /// Bases, actors, and walls must lie on the board and may not share tiles.
    pub fn from_layout(config: &GameConfig, layout: &Layout) -> Result<Self, SetupError> {
        let mut board = Self::new(config)?;
        let mut claimed = BTreeSet::new();

        for team_layout in &layout.teams {
            claim(&mut claimed, board.map_size, team_layout.base)?;
            board.register_team(&team_layout.team, team_layout.base)?;
        }

        for team_layout in &layout.teams {
            for (ident, actor) in (0u32..).zip(&team_layout.actors) {
                claim(&mut claimed, board.map_size, actor.coordinates)?;
                let id = ActorId::new(team_layout.team.name.clone(), ident);
                board.insert_actor(ActorSeed::new(id, actor.kind), actor.coordinates)?;
            }
        }

        for wall in &layout.walls {
            claim(&mut claimed, board.map_size, *wall)?;
            let _ = board.walls.insert(*wall);
        }

        Ok(board)
    }

    /// Runs the complete match setup: bases and flags, every team's actor
    /// roster from the configuration, then walls.
    pub fn setup_match(&mut self, teams: &[Team]) -> Result<(), SetupError> {
        self.place_bases_and_flags(teams)?;

        for team in teams {
            let base = self
                .bases
                .get(&team.name)
                .copied()
                .ok_or_else(|| SetupError::UnknownTeam(team.name.clone()))?;
            let actors = (0u32..)
                .zip(&self.config.actors)
                .map(|(ident, kind)| ActorSeed::new(ActorId::new(team.name.clone(), ident), *kind))
                .collect();
            self.place_actors(actors, base)?;
        }

        let walls = self.config.walls;
        self.place_walls(walls)
    }

    /// Assigns every team a base in a distinct starting region and puts the
    /// team's flag on it.
    pub fn place_bases_and_flags(&mut self, teams: &[Team]) -> Result<(), SetupError> {
        if !self.bases.is_empty() {
            return Err(SetupError::BasesAlreadyPlaced);
        }
        for (index, team) in teams.iter().enumerate() {
            if teams[..index].contains(team) {
                return Err(SetupError::DuplicateTeam(team.name.clone()));
            }
        }

        let locations = placement::draw_base_locations(&mut self.rng, self.map_size, teams.len())?;
        for (team, base) in teams.iter().zip(locations) {
            self.register_team(team, base)?;
            info!(team = %team.name, %base, "base and flag placed");
        }
        Ok(())
    }

    /// Scatters actors over the free tiles within the spawn radius of `base`.
    pub fn place_actors(
        &mut self,
        actors: Vec<ActorSeed>,
        base: Coordinates,
    ) -> Result<(), SetupError> {
        for (index, seed) in actors.iter().enumerate() {
            if self.actors.contains_key(&seed.id)
                || actors[..index].iter().any(|other| other.id == seed.id)
            {
                return Err(SetupError::DuplicateActor(seed.id.clone()));
            }
            if !self.bases.contains_key(&seed.id.team) {
                return Err(SetupError::UnknownTeam(seed.id.team.clone()));
            }
        }

        let eligible = placement::free_area(base, self.config.spawn_radius, self.map_size, |tile| {
            self.is_taken(tile)
        });
        let tiles = placement::sample(&mut self.rng, &eligible, actors.len()).map_err(|available| {
            SetupError::TooManyActors {
                requested: actors.len(),
                available,
            }
        })?;

        for (seed, coordinates) in actors.into_iter().zip(tiles) {
            info!(actor = %seed.id, %coordinates, "actor placed");
            let _ = self.actors.insert(
                seed.id,
                ActorState {
                    kind: seed.kind,
                    coordinates,
                },
            );
        }
        Ok(())
    }

    /// Places `count` walls on tiles outside the exclusion radius of every base.
    ///
    /// Requesting more walls than there are eligible tiles fails; nothing is
    /// placed in that case.
    pub fn place_walls(&mut self, count: usize) -> Result<(), SetupError> {
        if !self.walls.is_empty() {
            return Err(SetupError::WallsAlreadyPlaced);
        }

        let eligible = placement::wall_candidates(
            self.map_size,
            self.bases.values().copied(),
            self.config.wall_exclusion_radius,
            |tile| self.is_taken(tile),
        );
        let tiles = placement::sample(&mut self.rng, &eligible, count).map_err(|available| {
            SetupError::NotEnoughWallTiles {
                requested: count,
                available,
            }
        })?;

        self.walls.extend(tiles);
        info!(count, "walls placed");
        Ok(())
    }

    /// Tile one step from the actor in `direction`, clamped at the board edge.
    #[must_use]
    pub fn compute_target(&self, actor: &ActorId, direction: Direction) -> Option<Coordinates> {
        let origin = self.actor_coordinates(actor)?;
        Some(geometry::compute_target(origin, direction, self.map_size))
    }

    /// Moves the actor one tile, reporting why the move was refused.
    ///
    /// A refused move leaves the board untouched. A carried flag follows its
    /// carrier implicitly.
    pub fn try_move(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<Moved, MoveRejection> {
        match self.check_move(actor, direction) {
            Ok(moved) => {
                if let Some(state) = self.actors.get_mut(actor) {
                    state.coordinates = moved.to;
                }
                info!(actor = %actor, from = %moved.from, to = %moved.to, "actor moved");
                Ok(moved)
            }
            Err(reason) => {
                warn!(actor = %actor, %direction, %reason, "actor did not move");
                Err(reason)
            }
        }
    }

    /// Moves the actor one tile, returning whether it moved.
    pub fn move_actor(&mut self, actor: &ActorId, direction: Direction) -> bool {
        self.try_move(actor, direction).is_ok()
    }

    /// Relocates the actor to a random free tile near its base.
    ///
    /// A carried flag is dropped on the actor's old tile before it leaves.
    /// Free flags never share a tile: when another one already lies there,
    /// the dropped flag goes back to its base instead.
    pub fn respawn(&mut self, actor: &ActorId) -> Result<Respawned, RespawnError> {
        let result = self.relocate_near_base(actor);
        if let Err(reason) = &result {
            warn!(actor = %actor, %reason, "actor could not respawn");
        }
        result
    }

    /// Puts the flag back onto its owner's base, wherever it currently is.
    pub fn return_flag_to_base(&mut self, flag: &TeamName) -> Option<Coordinates> {
        let base = self.bases.get(flag).copied()?;
        let _ = self.flags.insert(flag.clone(), FlagPosition::Grid(base));
        info!(%flag, %base, "flag returned to base");
        Some(base)
    }

    /// Picks up the flag lying on, or carried by the actor standing on, the
    /// neighbouring tile.
    pub fn grab(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<Grabbed, GrabRejection> {
        let result = self.try_grab(actor, direction);
        match &result {
            Ok(grabbed) => info!(actor = %actor, flag = %grabbed.flag, "actor grabbed flag"),
            Err(reason) => warn!(actor = %actor, %direction, %reason, "actor did not grab"),
        }
        result
    }

    /// Puts the carried flag onto the neighbouring tile, hands it to the actor
    /// standing there, or scores it on the carrier's own base.
    pub fn put(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<PutOutcome, PutRejection> {
        let result = self.try_put(actor, direction);
        match &result {
            Ok(PutOutcome::Scored { flag }) => info!(actor = %actor, %flag, "actor scored flag"),
            Ok(_) => info!(actor = %actor, %direction, "actor put flag"),
            Err(reason) => warn!(actor = %actor, %direction, %reason, "actor did not put"),
        }
        result
    }

    /// Attacks the enemy standing on the neighbouring tile, respawning it on
    /// a hit.
    pub fn attack(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<Attacked, AttackRejection> {
        let result = self.try_attack(actor, direction);
        match &result {
            Ok(attacked) => info!(actor = %actor, target = %attacked.target, "actor attacked"),
            Err(reason) => warn!(actor = %actor, %direction, %reason, "actor did not attack"),
        }
        result
    }

    fn register_team(&mut self, team: &Team, base: Coordinates) -> Result<(), SetupError> {
        if self.bases.contains_key(&team.name) {
            return Err(SetupError::DuplicateTeam(team.name.clone()));
        }
        self.teams.push(team.clone());
        let _ = self.bases.insert(team.name.clone(), base);
        let _ = self
            .flags
            .insert(team.name.clone(), FlagPosition::Grid(base));
        Ok(())
    }

    fn insert_actor(
        &mut self,
        seed: ActorSeed,
        coordinates: Coordinates,
    ) -> Result<(), SetupError> {
        if !self.bases.contains_key(&seed.id.team) {
            return Err(SetupError::UnknownTeam(seed.id.team));
        }
        if self.actors.contains_key(&seed.id) {
            return Err(SetupError::DuplicateActor(seed.id));
        }
        let _ = self.actors.insert(
            seed.id,
            ActorState {
                kind: seed.kind,
                coordinates,
            },
        );
        Ok(())
    }

    fn check_move(&self, actor: &ActorId, direction: Direction) -> Result<Moved, MoveRejection> {
        let from = self
            .actor_coordinates(actor)
            .ok_or(MoveRejection::UnknownActor)?;
        let to = geometry::compute_target(from, direction, self.map_size);

        if to == from {
            Err(MoveRejection::OutOfBounds)
        } else if self.actor_at(to).is_some() {
            Err(MoveRejection::Occupied)
        } else if self.base_at(to).is_some() {
            Err(MoveRejection::Base)
        } else if self.walls.contains(&to) {
            Err(MoveRejection::Wall)
        } else {
            Ok(Moved { from, to })
        }
    }

    fn relocate_near_base(&mut self, actor: &ActorId) -> Result<Respawned, RespawnError> {
        let from = self
            .actor_coordinates(actor)
            .ok_or(RespawnError::UnknownActor)?;
        let base = self
            .bases
            .get(&actor.team)
            .copied()
            .ok_or(RespawnError::MissingBase)?;

        let eligible = placement::free_area(base, self.config.spawn_radius, self.map_size, |tile| {
            self.is_taken(tile)
        });
        let to = eligible
            .choose(&mut self.rng)
            .copied()
            .ok_or(RespawnError::NoFreeTile)?;

        let dropped_flag = self.carried_flag(actor).cloned();
        if let Some(flag) = &dropped_flag {
            let coordinates = match self.free_flag_at(from) {
                Some(_) => self.bases.get(flag).copied().unwrap_or(from),
                None => from,
            };
            let _ = self
                .flags
                .insert(flag.clone(), FlagPosition::Grid(coordinates));
            info!(actor = %actor, %flag, %coordinates, "actor dropped flag");
        }
        if let Some(state) = self.actors.get_mut(actor) {
            state.coordinates = to;
        }
        info!(actor = %actor, %from, %to, "actor respawned");

        Ok(Respawned {
            from,
            to,
            dropped_flag,
        })
    }

    fn try_grab(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<Grabbed, GrabRejection> {
        let state = self
            .actors
            .get(actor)
            .copied()
            .ok_or(GrabRejection::UnknownActor)?;
        let properties = state.kind.properties();
        if !properties.can_grab() {
            return Err(GrabRejection::CannotGrab);
        }
        if self.carried_flag(actor).is_some() {
            return Err(GrabRejection::AlreadyCarrying);
        }

        let target = geometry::compute_target(state.coordinates, direction, self.map_size);
        if target == state.coordinates {
            return Err(GrabRejection::OutOfBounds);
        }
        let (flag, from) = self.flag_at(target).ok_or(GrabRejection::NoFlag)?;
        if !self.roll(properties.grab) {
            return Err(GrabRejection::Failed);
        }

        let _ = self
            .flags
            .insert(flag.clone(), FlagPosition::Carried(actor.clone()));
        Ok(Grabbed { flag, from })
    }

    fn try_put(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<PutOutcome, PutRejection> {
        let state = self
            .actors
            .get(actor)
            .copied()
            .ok_or(PutRejection::UnknownActor)?;
        let flag = self
            .carried_flag(actor)
            .cloned()
            .ok_or(PutRejection::NotCarrying)?;

        let target = geometry::compute_target(state.coordinates, direction, self.map_size);
        if target == state.coordinates {
            return Err(PutRejection::OutOfBounds);
        }
        if self.walls.contains(&target) {
            return Err(PutRejection::Blocked);
        }

        let outcome = if let Some(owner) = self.base_at(target) {
            if *owner != actor.team || flag == actor.team {
                return Err(PutRejection::Blocked);
            }
            PutOutcome::Scored { flag: flag.clone() }
        } else if let Some(recipient) = self.actor_at(target) {
            let can_carry = self
                .actors
                .get(recipient)
                .is_some_and(|other| other.kind.properties().can_grab());
            if !can_carry || self.carried_flag(recipient).is_some() {
                return Err(PutRejection::Blocked);
            }
            PutOutcome::HandedOver {
                flag: flag.clone(),
                recipient: recipient.clone(),
                coordinates: target,
            }
        } else if self.flag_at(target).is_some() {
            return Err(PutRejection::Blocked);
        } else {
            PutOutcome::Dropped {
                flag: flag.clone(),
                coordinates: target,
            }
        };

        if !self.roll(state.kind.properties().grab) {
            return Err(PutRejection::Failed);
        }

        let position = match &outcome {
            PutOutcome::Scored { .. } => {
                FlagPosition::Grid(self.bases.get(&flag).copied().unwrap_or(target))
            }
            PutOutcome::HandedOver { recipient, .. } => FlagPosition::Carried(recipient.clone()),
            PutOutcome::Dropped { coordinates, .. } => FlagPosition::Grid(*coordinates),
        };
        let _ = self.flags.insert(flag, position);
        Ok(outcome)
    }

    fn try_attack(
        &mut self,
        actor: &ActorId,
        direction: Direction,
    ) -> Result<Attacked, AttackRejection> {
        let state = self
            .actors
            .get(actor)
            .copied()
            .ok_or(AttackRejection::UnknownActor)?;
        let properties = state.kind.properties();
        if !properties.can_attack() {
            return Err(AttackRejection::CannotAttack);
        }

        let target = geometry::compute_target(state.coordinates, direction, self.map_size);
        if target == state.coordinates {
            return Err(AttackRejection::NoTarget);
        }
        let victim = self
            .actor_at(target)
            .cloned()
            .ok_or(AttackRejection::NoTarget)?;
        if victim.team == actor.team {
            return Err(AttackRejection::FriendlyFire);
        }
        if !self.roll(properties.attack) {
            return Err(AttackRejection::Failed);
        }

        let respawn = self.respawn(&victim).map_err(AttackRejection::Respawn)?;
        Ok(Attacked {
            target: victim,
            respawn,
        })
    }

    fn roll(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    fn actor_coordinates(&self, actor: &ActorId) -> Option<Coordinates> {
        self.actors.get(actor).map(|state| state.coordinates)
    }

    fn actor_at(&self, tile: Coordinates) -> Option<&ActorId> {
        self.actors
            .iter()
            .find_map(|(id, state)| (state.coordinates == tile).then_some(id))
    }

    fn base_at(&self, tile: Coordinates) -> Option<&TeamName> {
        self.bases
            .iter()
            .find_map(|(team, base)| (*base == tile).then_some(team))
    }

    fn carried_flag(&self, actor: &ActorId) -> Option<&TeamName> {
        self.flags.iter().find_map(|(team, position)| match position {
            FlagPosition::Carried(carrier) if carrier == actor => Some(team),
            _ => None,
        })
    }

    fn flag_coordinates(&self, flag: &TeamName) -> Option<Coordinates> {
        match self.flags.get(flag)? {
            FlagPosition::Grid(coordinates) => Some(*coordinates),
            FlagPosition::Carried(carrier) => self.actor_coordinates(carrier),
        }
    }

    fn free_flag_at(&self, tile: Coordinates) -> Option<&TeamName> {
        self.flags
            .iter()
            .find_map(|(team, position)| (*position == FlagPosition::Grid(tile)).then_some(team))
    }

    /// Free flag on the tile, otherwise the flag carried by the actor there.
    fn flag_at(&self, tile: Coordinates) -> Option<(TeamName, Option<ActorId>)> {
        if let Some(team) = self.free_flag_at(tile) {
            return Some((team.clone(), None));
        }

        let carrier = self.actor_at(tile)?;
        let team = self.carried_flag(carrier)?;
        Some((team.clone(), Some(carrier.clone())))
    }

    fn is_taken(&self, tile: Coordinates) -> bool {
        self.walls.contains(&tile)
            || self.base_at(tile).is_some()
            || self.actor_at(tile).is_some()
            || self.free_flag_at(tile).is_some()
    }
}

fn claim(
    claimed: &mut BTreeSet<Coordinates>,
    map_size: MapSize,
    coordinates: Coordinates,
) -> Result<(), SetupError> {
    if !map_size.contains(coordinates) {
        return Err(SetupError::OutOfBounds(coordinates));
    }
    if !claimed.insert(coordinates) {
        return Err(SetupError::Overlap(coordinates));
    }
    Ok(())
}

/// Applies the provided command to the board, reporting the outcome as events.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { actor, direction } => match board.try_move(&actor, direction) {
            Ok(Moved { from, to }) => out_events.push(Event::ActorMoved { actor, from, to }),
            Err(reason) => out_events.push(Event::MoveRejected {
                actor,
                direction,
                reason,
            }),
        },
        Command::Grab { actor, direction } => match board.grab(&actor, direction) {
            Ok(Grabbed { flag, from }) => out_events.push(Event::FlagGrabbed { actor, flag, from }),
            Err(reason) => out_events.push(Event::GrabRejected { actor, reason }),
        },
        Command::Put { actor, direction } => match board.put(&actor, direction) {
            Ok(PutOutcome::Dropped { flag, coordinates }) => out_events.push(Event::FlagPut {
                actor,
                flag,
                recipient: None,
                coordinates,
            }),
            Ok(PutOutcome::HandedOver {
                flag,
                recipient,
                coordinates,
            }) => out_events.push(Event::FlagPut {
                actor,
                flag,
                recipient: Some(recipient),
                coordinates,
            }),
            Ok(PutOutcome::Scored { flag }) => out_events.push(Event::FlagScored { actor, flag }),
            Err(reason) => out_events.push(Event::PutRejected { actor, reason }),
        },
        Command::Attack { actor, direction } => match board.attack(&actor, direction) {
            Ok(Attacked { target, respawn }) => {
                out_events.push(Event::ActorAttacked {
                    attacker: actor,
                    target: target.clone(),
                });
                out_events.push(respawned_event(target, respawn));
            }
            Err(reason) => out_events.push(Event::AttackRejected { actor, reason }),
        },
        Command::Respawn { actor } => match board.respawn(&actor) {
            Ok(respawn) => out_events.push(respawned_event(actor, respawn)),
            Err(reason) => out_events.push(Event::RespawnRejected { actor, reason }),
        },
        Command::ReturnFlag { flag } => {
            if let Some(to) = board.return_flag_to_base(&flag) {
                out_events.push(Event::FlagReturned { flag, to });
            } else {
                warn!(%flag, "flag has no base to return to");
            }
        }
    }
}

/// Applies a tick's worth of commands in submission order.
///
/// This is the single mutation pass per tick; hosts that accept orders
/// concurrently must serialise calls to it.
pub fn apply_tick(board: &mut Board, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        apply(board, command, &mut events);
    }
    events
}

fn respawned_event(actor: ActorId, respawn: Respawned) -> Event {
    Event::ActorRespawned {
        actor,
        from: respawn.from,
        to: respawn.to,
        dropped_flag: respawn.dropped_flag,
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use std::collections::BTreeSet;

    use super::{Board, FlagPosition};
    use ascifight_core::{
        ActorId, ActorKind, ActorSnapshot, BaseSnapshot, BoardObject, BoardSnapshot, Coordinates,
        FlagSnapshot, MapSize, Team, TeamName,
    };

    /// Edge length of the board.
    #[must_use]
    pub fn map_size(board: &Board) -> MapSize {
        board.map_size
    }

    /// Teams registered on the board in registration order.
    #[must_use]
    pub fn teams(board: &Board) -> &[Team] {
        &board.teams
    }

    /// Identifiers of every actor in ascending order.
    pub fn actors(board: &Board) -> impl Iterator<Item = &ActorId> {
        board.actors.keys()
    }

    /// Current tile of an actor.
    #[must_use]
    pub fn actor_coordinates(board: &Board, actor: &ActorId) -> Option<Coordinates> {
        board.actor_coordinates(actor)
    }

    /// Type of an actor.
    #[must_use]
    pub fn actor_kind(board: &Board, actor: &ActorId) -> Option<ActorKind> {
        board.actors.get(actor).map(|state| state.kind)
    }

    /// Owner of the flag the actor carries, if any.
    #[must_use]
    pub fn carried_flag<'board>(board: &'board Board, actor: &ActorId) -> Option<&'board TeamName> {
        board.carried_flag(actor)
    }

    /// Actor carrying the flag, if any.
    #[must_use]
    pub fn flag_carrier<'board>(board: &'board Board, flag: &TeamName) -> Option<&'board ActorId> {
        match board.flags.get(flag)? {
            FlagPosition::Carried(carrier) => Some(carrier),
            FlagPosition::Grid(_) => None,
        }
    }

    /// Current tile of a flag; a carried flag reports its carrier's tile.
    #[must_use]
    pub fn flag_coordinates(board: &Board, flag: &TeamName) -> Option<Coordinates> {
        board.flag_coordinates(flag)
    }

    /// Tile of a team's base.
    #[must_use]
    pub fn base_coordinates(board: &Board, team: &TeamName) -> Option<Coordinates> {
        board.bases.get(team).copied()
    }

    /// Wall tiles in ascending order.
    #[must_use]
    pub fn walls(board: &Board) -> &BTreeSet<Coordinates> {
        &board.walls
    }

    /// Everything present on a tile: base, actor, flags, then wall.
    #[must_use]
    pub fn objects_at(board: &Board, coordinates: Coordinates) -> Vec<BoardObject> {
        let mut objects = Vec::new();
        if let Some(team) = board.base_at(coordinates) {
            objects.push(BoardObject::Base(team.clone()));
        }
        if let Some(actor) = board.actor_at(coordinates) {
            objects.push(BoardObject::Actor(actor.clone()));
        }
        for team in board.flags.keys() {
            if board.flag_coordinates(team) == Some(coordinates) {
                objects.push(BoardObject::Flag(team.clone()));
            }
        }
        if board.walls.contains(&coordinates) {
            objects.push(BoardObject::Wall);
        }
        objects
    }

    /// Captures a point-in-time copy of the board.
    #[must_use]
    pub fn snapshot(board: &Board) -> BoardSnapshot {
        let actors = board
            .actors
            .iter()
            .map(|(id, state)| ActorSnapshot {
                id: id.clone(),
                kind: state.kind,
                coordinates: state.coordinates,
                flag: board.carried_flag(id).cloned(),
            })
            .collect();

        let flags = board
            .flags
            .iter()
            .filter_map(|(team, position)| {
                let carrier = match position {
                    FlagPosition::Carried(carrier) => Some(carrier.clone()),
                    FlagPosition::Grid(_) => None,
                };
                Some(FlagSnapshot {
                    team: team.clone(),
                    coordinates: board.flag_coordinates(team)?,
                    carrier,
                })
            })
            .collect();

        let bases = board
            .bases
            .iter()
            .map(|(team, coordinates)| BaseSnapshot {
                team: team.clone(),
                coordinates: *coordinates,
            })
            .collect();

        BoardSnapshot {
            map_size: board.map_size,
            actors,
            flags,
            bases,
            walls: board.walls.iter().copied().collect(),
        }
    }
}
