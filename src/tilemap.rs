//! Reads the text tile maps the herding game ships its mazes in. One line per row, one
//! character per cell:
//!
//! | tile | meaning                       |
//! |------|-------------------------------|
//! | `w`  | wall                          |
//! | ` `  | open floor                    |
//! | `p`  | player start (open)           |
//! | `a`  | agent start (open)            |
//! | `c`  | capture zone cell (open)      |
use crate::coordinator::RoundSetup;
use crate::error::{GridError, TileMapError};
use crate::Cell;

/// The game's 20x20 maze with the pen in the middle.
pub const HERDING_MAP: [&str; 20] = [
    "wwwwwwwwwwwwwwwwwwww",
    "wp      ww     w   w",
    "w www w w  w w w w w",
    "w w   w w ww w w w w",
    "w w w w  a   w w   w",
    "w   w   ww w w   w w",
    "www w w w  w ww ww w",
    "w   w w w ww       w",
    "w www w      ww wwww",
    "wa    ww cc        w",
    "w w w    cc wwww w w",
    "w w wwww    w    w w",
    "w w    w wwww wwww w",
    "w wwww         w   w",
    "w      www www w www",
    "wwww w   w w       w",
    "w    w w w   w www w",
    "w wwww w www w  ww w",
    "w      w     ww    w",
    "wwwwwwwwwwwwwwwwwwww",
];

pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<RoundSetup, TileMapError> {
    let width = lines
        .first()
        .map(|l| l.as_ref().chars().count())
        .unwrap_or(0);
    if width == 0 {
        return Err(GridError::Empty.into());
    }
    let mut rows = Vec::with_capacity(lines.len());
    let mut player: Option<Cell> = None;
    let mut agents = Vec::new();
    let mut zone = Vec::new();
    for (y, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let found = line.chars().count();
        if found != width {
            return Err(GridError::Ragged {
                row: y,
                expected: width,
                found,
            }
            .into());
        }
        let mut row = Vec::with_capacity(width);
        for (x, ch) in line.chars().enumerate() {
            let cell = Cell::new(x as i32, y as i32);
            match ch {
                'w' => {}
                ' ' => {}
                'p' => {
                    if let Some(first) = player {
                        return Err(TileMapError::MultiplePlayers {
                            first,
                            second: cell,
                        });
                    }
                    player = Some(cell);
                }
                'a' => agents.push(cell),
                'c' => zone.push(cell),
                _ => return Err(TileMapError::UnknownTile { ch, cell }),
            }
            row.push(ch == 'w');
        }
        rows.push(row);
    }
    let player = player.ok_or(TileMapError::MissingPlayer)?;
    Ok(RoundSetup {
        rows,
        player,
        agents,
        zone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn herding_map_layout() {
        let setup = parse(&HERDING_MAP).unwrap();
        assert_eq!(setup.rows.len(), 20);
        assert!(setup.rows.iter().all(|r| r.len() == 20));
        assert_eq!(setup.player, Cell::new(1, 1));
        assert_eq!(setup.agents, vec![Cell::new(9, 4), Cell::new(1, 9)]);
        assert_eq!(
            setup.zone,
            vec![
                Cell::new(9, 9),
                Cell::new(10, 9),
                Cell::new(9, 10),
                Cell::new(10, 10)
            ]
        );
        assert!(setup.rows[0][0]);
        assert!(!setup.rows[1][1]);
    }

    #[test]
    fn missing_player() {
        assert_eq!(parse(&["w a"]).unwrap_err(), TileMapError::MissingPlayer);
    }

    #[test]
    fn two_players() {
        assert_eq!(
            parse(&["p", "p"]).unwrap_err(),
            TileMapError::MultiplePlayers {
                first: Cell::new(0, 0),
                second: Cell::new(0, 1)
            }
        );
    }

    #[test]
    fn unknown_tile() {
        assert_eq!(
            parse(&["p#"]).unwrap_err(),
            TileMapError::UnknownTile {
                ch: '#',
                cell: Cell::new(1, 0)
            }
        );
    }

    #[test]
    fn ragged_and_empty_maps() {
        assert_eq!(
            parse(&["p  ", "w"]).unwrap_err(),
            TileMapError::Grid(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 1
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            parse(&empty).unwrap_err(),
            TileMapError::Grid(GridError::Empty)
        );
    }
}
