//! Explicit board layouts for scripted matches and replays.

use std::{fs, io, path::Path};

use ascifight_core::{ActorKind, Coordinates, Team};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hand-authored arrangement of bases, actors, and walls.
///
/// Flags start on their team's base. Actor idents are assigned in the order
/// the actors are listed for their team.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Teams with their base and actors.
    #[serde(default)]
    pub teams: Vec<TeamLayout>,
    /// Wall tiles.
    #[serde(default)]
    pub walls: Vec<Coordinates>,
}

/// A single team's part of a [`Layout`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamLayout {
    /// Team taking part in the match.
    pub team: Team,
    /// Tile holding the team's base and, initially, its flag.
    pub base: Coordinates,
    /// Actors in ident order.
    #[serde(default)]
    pub actors: Vec<ActorLayout>,
}

/// Starting tile of a single actor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ActorLayout {
    /// Type of the actor.
    pub kind: ActorKind,
    /// Tile the actor starts on.
    pub coordinates: Coordinates,
}

impl Layout {
    /// Parses a layout document.
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Adds a team with its base and actors.
    #[must_use]
    pub fn with_team(
        mut self,
        team: Team,
        base: Coordinates,
        actors: impl IntoIterator<Item = (ActorKind, Coordinates)>,
    ) -> Self {
        self.teams.push(TeamLayout {
            team,
            base,
            actors: actors
                .into_iter()
                .map(|(kind, coordinates)| ActorLayout { kind, coordinates })
                .collect(),
        });
        self
    }

    /// Adds wall tiles.
    #[must_use]
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Coordinates>) -> Self {
        self.walls.extend(walls);
        self
    }
}

/// Failures while loading a [`Layout`].
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The file could not be read.
    #[error("failed to read layout file: {0}")]
    Io(#[from] io::Error),
    /// The contents are not a valid layout document.
    #[error("failed to parse layout toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_teams_actors_and_walls() {
        let layout = Layout::from_toml_str(
            r#"
            walls = [{ x = 4, y = 5 }]

            [[teams]]
            team = { name = "red", number = 0 }
            base = { x = 1, y = 1 }
            actors = [
                { kind = "Runner", coordinates = { x = 2, y = 2 } },
                { kind = "Blocker", coordinates = { x = 3, y = 1 } },
            ]

            [[teams]]
            team = { name = "blue", number = 1 }
            base = { x = 8, y = 8 }
            "#,
        )
        .expect("layout parses");

        assert_eq!(layout.teams.len(), 2);
        assert_eq!(layout.teams[0].actors.len(), 2);
        assert_eq!(layout.teams[0].actors[1].kind, ActorKind::Blocker);
        assert!(layout.teams[1].actors.is_empty());
        assert_eq!(layout.walls, vec![Coordinates::new(4, 5)]);
    }

    #[test]
    fn malformed_layout_is_a_parse_error() {
        let error = Layout::from_toml_str("[[teams]]\nbase = 3\n").expect_err("bad base");
        assert!(matches!(error, LayoutError::Parse(_)));
        assert!(error.to_string().starts_with("failed to parse layout toml"));
    }

    #[test]
    fn missing_layout_file_reports_io_error() {
        let error = Layout::load("/definitely/not/here/layout.toml").expect_err("no such file");
        assert!(matches!(error, LayoutError::Io(_)));
        assert!(error.to_string().starts_with("failed to read layout file"));
    }
}
