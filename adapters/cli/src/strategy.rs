//! Scripted team behaviour for headless matches.

use ascifight_core::{
    geometry::{self, manhattan_distance},
    ActorSnapshot, BoardSnapshot, Command, Coordinates,
};
use ascifight_system_pathfinding::Pathfinding;

/// What an actor is heading for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Objective {
    /// Pick up the flag on this tile.
    Grab(Coordinates),
    /// Deliver the carried flag onto this base.
    Score(Coordinates),
    /// Hit the enemy on this tile.
    Attack(Coordinates),
}

impl Objective {
    fn target(self) -> Coordinates {
        match self {
            Self::Grab(target) | Self::Score(target) | Self::Attack(target) => target,
        }
    }
}

/// Issues one order per actor: act when next to the objective, otherwise
/// step toward it.
pub(crate) fn orders(snapshot: &BoardSnapshot, pathfinding: &Pathfinding) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut goals = Vec::new();

    for actor in &snapshot.actors {
        let Some(objective) = objective(snapshot, actor) else {
            continue;
        };
        let target = objective.target();
        let Some(direction) = geometry::direction_between(actor.coordinates, target) else {
            goals.push((actor.id.clone(), target));
            continue;
        };

        let id = actor.id.clone();
        commands.push(match objective {
            Objective::Grab(_) => Command::Grab {
                actor: id,
                direction,
            },
            Objective::Score(_) => Command::Put {
                actor: id,
                direction,
            },
            Objective::Attack(_) => Command::Attack {
                actor: id,
                direction,
            },
        });
    }

    pathfinding.handle(snapshot, &goals, &mut commands);
    commands
}

fn objective(snapshot: &BoardSnapshot, actor: &ActorSnapshot) -> Option<Objective> {
    let properties = actor.kind.properties();

    if properties.can_grab() {
        if actor.flag.is_some() {
            return snapshot
                .base(&actor.id.team)
                .map(|base| Objective::Score(base.coordinates));
        }
        return snapshot
            .flags
            .iter()
            .filter(|flag| flag.team != actor.id.team)
            .filter(|flag| {
                flag.carrier
                    .as_ref()
                    .map_or(true, |carrier| carrier.team != actor.id.team)
            })
            .map(|flag| flag.coordinates)
            .min_by_key(|tile| manhattan_distance(actor.coordinates, *tile))
            .map(Objective::Grab);
    }

    if properties.can_attack() {
        return snapshot
            .actors
            .iter()
            .filter(|other| other.id.team != actor.id.team)
            .map(|other| other.coordinates)
            .min_by_key(|tile| manhattan_distance(actor.coordinates, *tile))
            .map(Objective::Attack);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascifight_core::{
        ActorId, ActorKind, BaseSnapshot, Direction, FlagSnapshot, MapSize, TeamName,
    };

    fn actor(team: &str, ident: u32, kind: ActorKind, x: u32, y: u32) -> ActorSnapshot {
        ActorSnapshot {
            id: ActorId::new(TeamName::new(team), ident),
            kind,
            coordinates: Coordinates::new(x, y),
            flag: None,
        }
    }

    fn snapshot(actors: Vec<ActorSnapshot>) -> BoardSnapshot {
        BoardSnapshot {
            map_size: MapSize::new(10).expect("non-empty map"),
            actors,
            flags: vec![
                FlagSnapshot {
                    team: TeamName::new("blue"),
                    coordinates: Coordinates::new(8, 8),
                    carrier: None,
                },
                FlagSnapshot {
                    team: TeamName::new("red"),
                    coordinates: Coordinates::new(1, 1),
                    carrier: None,
                },
            ],
            bases: vec![
                BaseSnapshot {
                    team: TeamName::new("blue"),
                    coordinates: Coordinates::new(8, 8),
                },
                BaseSnapshot {
                    team: TeamName::new("red"),
                    coordinates: Coordinates::new(1, 1),
                },
            ],
            walls: Vec::new(),
        }
    }

    #[test]
    fn adjacent_objectives_become_actions() {
        let mut carrier = actor("red", 0, ActorKind::Runner, 2, 1);
        carrier.flag = Some(TeamName::new("blue"));
        let snapshot = snapshot(vec![
            carrier,
            actor("red", 1, ActorKind::Generalist, 8, 7),
            actor("blue", 0, ActorKind::Blocker, 5, 5),
            actor("red", 2, ActorKind::Attacker, 5, 4),
        ]);

        let commands = orders(&snapshot, &Pathfinding::default());
        assert_eq!(
            commands,
            vec![
                Command::Put {
                    actor: ActorId::new(TeamName::new("red"), 0),
                    direction: Direction::Left,
                },
                Command::Grab {
                    actor: ActorId::new(TeamName::new("red"), 1),
                    direction: Direction::Up,
                },
                Command::Attack {
                    actor: ActorId::new(TeamName::new("red"), 2),
                    direction: Direction::Up,
                },
            ]
        );
    }

    #[test]
    fn distant_objectives_become_moves() {
        let snapshot = snapshot(vec![actor("red", 0, ActorKind::Generalist, 3, 3)]);
        let commands = orders(&snapshot, &Pathfinding::default());
        assert!(matches!(
            commands.as_slice(),
            [Command::Move {
                direction: Direction::Right | Direction::Up,
                ..
            }]
        ));
    }

    #[test]
    fn blockers_stay_put() {
        let snapshot = snapshot(vec![actor("red", 0, ActorKind::Blocker, 3, 3)]);
        assert!(orders(&snapshot, &Pathfinding::default()).is_empty());
    }
}
