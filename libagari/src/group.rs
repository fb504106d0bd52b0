//! Groupings and the stateless detectors the search is built on.
//!
//! Every function here treats its input as an unordered multiset and never
//! mutates it. Detectors match tiles by identity, ignoring promotion, but hand
//! back the specific tiles they found so the flags survive into the final
//! decomposition.
use crate::hand::tiles_to_string;
use crate::tile::{IDENTITY_COUNT, Tile};
use std::fmt;

use serde::Serialize;
use tinyvec::ArrayVec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// 順子
    #[default]
    Sequence,
    /// 刻子
    Triple,
    /// 槓子, never produced by the search itself.
    Quad,
    /// 対子
    Pair,
}

/// A group owning copies of its tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Group {
    pub kind: GroupKind,
    pub tiles: ArrayVec<[Tile; 4]>,
}

impl Group {
    #[must_use]
    pub fn sequence(tiles: [Tile; 3]) -> Self {
        Self::from_slice(GroupKind::Sequence, &tiles)
    }

    #[must_use]
    pub fn triple(tiles: [Tile; 3]) -> Self {
        Self::from_slice(GroupKind::Triple, &tiles)
    }

    #[must_use]
    pub fn quad(tiles: [Tile; 4]) -> Self {
        Self::from_slice(GroupKind::Quad, &tiles)
    }

    #[must_use]
    pub fn pair(tiles: [Tile; 2]) -> Self {
        Self::from_slice(GroupKind::Pair, &tiles)
    }

    fn from_slice(kind: GroupKind, tiles: &[Tile]) -> Self {
        Self {
            kind,
            tiles: tiles.iter().copied().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Lowest tile of a sequence, or the shared tile of the other kinds.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    #[must_use]
    pub fn contains_exact(&self, tile: Tile) -> bool {
        self.tiles.iter().any(|&t| t.same_identity(tile, false))
    }

    #[must_use]
    pub fn contains_identity(&self, tile: Tile) -> bool {
        self.tiles.iter().any(|&t| t.same_identity(tile, true))
    }

    /// Same group with its tiles in sorted order, used as a comparison key.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut ret = self.clone();
        ret.tiles.sort();
        ret
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.kind {
            GroupKind::Sequence => ('[', ']'),
            GroupKind::Triple | GroupKind::Quad => ('<', '>'),
            GroupKind::Pair => ('(', ')'),
        };
        write!(f, "{open}{}{close}", tiles_to_string(&self.tiles))
    }
}

/// Drops the first tile strictly equal to `target`. Absence is not an error,
/// the result is then a plain copy.
#[must_use]
pub fn remove_one(tiles: &[Tile], target: Tile) -> Vec<Tile> {
    let mut ret = tiles.to_vec();
    if let Some(idx) = tiles.iter().position(|&t| t.same_identity(target, false)) {
        ret.remove(idx);
    }
    ret
}

/// Folds [`remove_one`] over `targets` in order.
#[must_use]
pub fn remove_many(tiles: &[Tile], targets: &[Tile]) -> Vec<Tile> {
    targets.iter().fold(tiles.to_vec(), |acc, &target| remove_one(&acc, target))
}

/// The first `N` tiles sharing the identity of `target`.
fn detect_same<const N: usize>(tiles: &[Tile], target: Tile) -> Option<[Tile; N]> {
    let mut found = ArrayVec::<[Tile; 4]>::new();
    for &tile in tiles {
        if tile.same_identity(target, true) {
            found.push(tile);
            if found.len() == N {
                return found.as_slice().try_into().ok();
            }
        }
    }
    None
}

#[inline]
#[must_use]
pub fn detect_pair(tiles: &[Tile], target: Tile) -> Option<[Tile; 2]> {
    detect_same(tiles, target)
}

#[inline]
#[must_use]
pub fn detect_triple(tiles: &[Tile], target: Tile) -> Option<[Tile; 3]> {
    detect_same(tiles, target)
}

/// A run starting at `start`. Only numbered suits with a start rank of 7 or
/// below can begin a sequence.
#[must_use]
pub fn detect_sequence(tiles: &[Tile], start: Tile) -> Option<[Tile; 3]> {
    if !start.suit().is_numbered() || start.rank() > 7 {
        return None;
    }
    let find = |want: Tile| tiles.iter().copied().find(|t| t.same_identity(want, true));

    let first = find(start)?;
    let second = find(start.step(1)?)?;
    let third = find(start.step(2)?)?;
    Some([first, second, third])
}

/// One representative per identity occurring at least twice, in order of
/// first occurrence.
#[must_use]
pub fn pair_candidates(tiles: &[Tile]) -> Vec<Tile> {
    let mut counts = [0_u8; IDENTITY_COUNT];
    let mut candidates = vec![];
    for &tile in tiles {
        let count = &mut counts[tile.identity_index()];
        *count += 1;
        if *count == 2 {
            let first = tiles
                .iter()
                .copied()
                .find(|t| t.same_identity(tile, true))
                .unwrap_or(tile);
            candidates.push(first);
        }
    }
    candidates
}
