#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded shortest-path planner that advises one step per actor and tick.

use std::collections::VecDeque;

use ascifight_core::{geometry, ActorId, BoardSnapshot, Command, Coordinates, Direction, MapSize};
use tracing::debug;

/// Default number of expansion rounds before a search gives up.
pub const MAX_STEPS: u32 = 100;

/// Distance recorded for tiles the search never reached.
const UNREACHED: u32 = u32::MAX;

/// Next step advised for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// Direction of the first step.
    pub direction: Direction,
    /// Steps between actor and target, when the search connected them within
    /// its bound.
    pub distance: Option<u32>,
}

impl Route {
    /// Reports whether the direction lies on a known shortest path.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.distance.is_some()
    }
}

/// Reverse breadth-first planner over a board snapshot.
///
/// Every actor other than the routed one, every base, and every wall block
/// the search. The target tile is always seeded, so routing onto a base or an
/// occupied tile works. Neighbours are scored in [`Direction::ALL`] order and
/// the first minimum wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathPlanner {
    max_steps: u32,
}

impl PathPlanner {
    /// Creates a planner with the provided expansion bound.
    #[must_use]
    pub const fn new(max_steps: u32) -> Self {
        Self { max_steps }
    }

    /// Expansion bound of the search.
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Plans the next step for `actor` toward `target`.
    ///
    /// When the search exhausts its bound the planner still advises the
    /// neighbour with the lowest recorded distance, falling back to the first
    /// in-bounds neighbour; [`Route::distance`] is `None` in that case.
    /// Returns `None` when the actor is missing from the snapshot, already
    /// stands on the target, the target lies off the board, or the board has
    /// no neighbouring tiles.
    #[must_use]
    pub fn plan(
        &self,
        snapshot: &BoardSnapshot,
        actor: &ActorId,
        target: Coordinates,
    ) -> Option<Route> {
        let origin = snapshot.actor(actor)?.coordinates;
        let size = snapshot.map_size;
        if origin == target || !size.contains(target) {
            return None;
        }

        let obstacles = snapshot.obstacles_for(actor);
        let field = DistanceField::search(size, target, origin, self.max_steps, |tile| {
            tile != origin && obstacles.contains(&tile)
        });

        let (direction, _) = geometry::neighbors(origin, size)
            .map(|(direction, tile)| (direction, field.distance(tile)))
            .min_by_key(|(_, distance)| *distance)?;

        let distance = Some(field.distance(origin)).filter(|distance| *distance != UNREACHED);
        if distance.is_none() {
            debug!(
                actor = %actor,
                %origin,
                %target,
                max_steps = self.max_steps,
                "search did not reach the actor"
            );
        }

        Some(Route {
            direction,
            distance,
        })
    }
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self::new(MAX_STEPS)
    }
}

/// Dense distances from the target, stored in row-major order.
#[derive(Clone, Debug)]
struct DistanceField {
    size: MapSize,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Expands outward from `target` until `origin` is reached or no tile
    /// within `max_steps` remains.
    fn search<F>(
        size: MapSize,
        target: Coordinates,
        origin: Coordinates,
        max_steps: u32,
        is_blocked: F,
    ) -> Self
    where
        F: Fn(Coordinates) -> bool,
    {
        let mut distances = vec![UNREACHED; size.tile_count()];
        let mut queue = VecDeque::new();

        if let Some(index) = size.index(target) {
            distances[index] = 0;
            queue.push_back(target);
        }

        while let Some(tile) = queue.pop_front() {
            let Some(current) = size.index(tile).map(|index| distances[index]) else {
                continue;
            };
            if current >= max_steps {
                continue;
            }

            for (_, neighbor) in geometry::neighbors(tile, size) {
                let Some(index) = size.index(neighbor) else {
                    continue;
                };
                if distances[index] != UNREACHED || is_blocked(neighbor) {
                    continue;
                }

                distances[index] = current + 1;
                if neighbor == origin {
                    return Self { size, distances };
                }
                queue.push_back(neighbor);
            }
        }

        Self { size, distances }
    }

    fn distance(&self, tile: Coordinates) -> u32 {
        self.size
            .index(tile)
            .and_then(|index| self.distances.get(index).copied())
            .unwrap_or(UNREACHED)
    }
}

/// Pure system that turns per-actor goals into move commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pathfinding {
    planner: PathPlanner,
}

impl Pathfinding {
    /// Creates the system around the provided planner.
    #[must_use]
    pub const fn new(planner: PathPlanner) -> Self {
        Self { planner }
    }

    /// Emits one move command per goal the planner can advise on.
    ///
    /// Goals are processed in order against the same snapshot, so later moves
    /// may be rejected once earlier ones have been applied.
    pub fn handle(
        &self,
        snapshot: &BoardSnapshot,
        goals: &[(ActorId, Coordinates)],
        out: &mut Vec<Command>,
    ) {
        for (actor, target) in goals {
            if let Some(route) = self.planner.plan(snapshot, actor, *target) {
                out.push(Command::Move {
                    actor: actor.clone(),
                    direction: route.direction,
                });
            }
        }
    }
}
