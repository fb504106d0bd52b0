//! Tile notation conversions.
//!
//! The notation is tenhou style: runs of digits closed by a suit letter, like
//! `123m 406p 789s 11z`, where `0` stands for the promoted 5 of that suit.

use crate::tile::{Suit, Tile, sort_tiles};

use anyhow::{Context, Result, bail, ensure};

/// Parse a run of tiles, keeping their written order.
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>> {
    ensure!(s.is_ascii(), "hand {s} contains non-ascii content");

    let mut tiles = vec![];
    let mut stack = vec![];

    for &b in s.as_bytes() {
        match b {
            b'0'..=b'9' => stack.push(b - b'0'),
            b'm' | b'p' | b's' | b'z' => {
                let suit = Suit::from_char(b as char).context("unreachable suit")?;
                for rank in stack.drain(..) {
                    let tile = if rank == 0 {
                        Tile::promoted(suit).with_context(|| format!("invalid tile 0{}", b as char))?
                    } else {
                        Tile::new(suit, rank)?
                    };
                    tiles.push(tile);
                }
            }
            _ if b.is_ascii_whitespace() => (),
            _ => bail!("unexpected byte {b} in {s:?}"),
        };
    }
    ensure!(stack.is_empty(), "dangling ranks without a suit in {s:?}");

    Ok(tiles)
}

/// Parse exactly one tile.
pub fn parse_tile(s: &str) -> Result<Tile> {
    let tiles = parse_tiles(s)?;
    ensure!(tiles.len() <= 1, "too many tiles in {s:?}");
    tiles.into_iter().next().context("missing tile")
}

/// Sorted notation, one digit run per suit.
#[must_use]
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut tiles = tiles.to_vec();
    sort_tiles(&mut tiles);

    tiles
        .chunk_by(|a, b| a.suit() == b.suit())
        .map(|chunk| {
            let mut run: String = chunk
                .iter()
                .map(|t| if t.is_promoted() { '0' } else { (b'0' + t.rank()) as char })
                .collect();
            run.push(chunk[0].suit().as_char());
            run
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorthand used by tests all over the crate.
#[cfg(test)]
pub(crate) fn hand(s: &str) -> Vec<Tile> {
    parse_tiles(s).unwrap()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let tiles = parse_tiles("406p 11z").unwrap();
        assert_eq!(tiles.len(), 5);
        assert!(tiles[1].is_promoted());
        assert_eq!(tiles[1].rank(), 5);
        assert_eq!(tiles[3].suit(), Suit::Honor);

        assert_eq!(parse_tiles("456m 6p 7899p 77z 987s 9p").unwrap().len(), 14);
        assert!(parse_tiles("").unwrap().is_empty());
    }

    #[test]
    fn parse_errors() {
        parse_tiles("0z").unwrap_err();
        parse_tiles("8z").unwrap_err();
        parse_tiles("12x").unwrap_err();
        parse_tiles("123").unwrap_err();
        parse_tiles("１m").unwrap_err();
        parse_tile("12m").unwrap_err();
        parse_tile("").unwrap_err();
    }

    #[test]
    fn string() {
        assert_eq!(tiles_to_string(&hand("7z 3m 0p 1m 4p 11z 9s")), "13m 40p 9s 117z");
        assert_eq!(tiles_to_string(&[]), "");
        assert_eq!(parse_tile("0s").unwrap().to_string(), "0s");
    }
}
