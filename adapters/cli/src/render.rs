//! Plain-text board dump for the terminal.

use ascifight_core::{BoardObject, Coordinates};
use ascifight_world::{query, Board};

const EMPTY: char = '.';
const WALL: char = '#';
const FLAG: char = 'F';

/// Draws the board top row first, so `Up` points up on screen.
///
/// Bases are drawn as the upper-case team initial and actors as the
/// lower-case one; a flag only shows on otherwise empty tiles.
pub(crate) fn board(board: &Board) -> String {
    let size = query::map_size(board).get();
    let mut out = String::new();

    for y in (0..size).rev() {
        for x in 0..size {
            let glyph = query::objects_at(board, Coordinates::new(x, y))
                .first()
                .map_or(EMPTY, glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn glyph(object: &BoardObject) -> char {
    match object {
        BoardObject::Base(team) => initial(team.as_str()).to_ascii_uppercase(),
        BoardObject::Actor(actor) => initial(actor.team.as_str()).to_ascii_lowercase(),
        BoardObject::Flag(_) => FLAG,
        BoardObject::Wall => WALL,
    }
}

fn initial(name: &str) -> char {
    name.chars().next().unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascifight_core::{ActorKind, Team};
    use ascifight_world::{GameConfig, Layout};

    #[test]
    fn draws_every_object_kind() {
        let layout = Layout::default()
            .with_team(
                Team::new("red", 0),
                Coordinates::new(0, 0),
                [(ActorKind::Runner, Coordinates::new(1, 0))],
            )
            .with_team(Team::new("blue", 1), Coordinates::new(2, 2), [])
            .with_walls([Coordinates::new(0, 2)]);
        let config = GameConfig {
            map_size: 3,
            ..GameConfig::default()
        };
        let board = Board::from_layout(&config, &layout).expect("valid layout");

        assert_eq!(super::board(&board), "#.B\n...\nRr.\n");
    }
}
