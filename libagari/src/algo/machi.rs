//! Completion category of the winning tile.
use crate::group::{Group, GroupKind};
use crate::tile::Tile;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wait {
    /// 単騎, the winning tile completed the pair.
    Tanki,
    /// 双碰, the winning tile completed a triple while another pair waits
    /// alongside it.
    Shanpon,
    /// 嵌張, middle of a sequence.
    Kanchan,
    /// 辺張, the 3 of 123 or the 7 of 789.
    Penchan,
    /// 両面
    Ryanmen,
}

impl Wait {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tanki => "tanki",
            Self::Shanpon => "shanpon",
            Self::Kanchan => "kanchan",
            Self::Penchan => "penchan",
            Self::Ryanmen => "ryanmen",
        }
    }
}

impl fmt::Display for Wait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wait formed when `winning_tile` is the tile that completed `group`.
///
/// The caller guarantees the group holds the winning tile. A triple always
/// counts as shanpon because the standard form keeps its head pair next to
/// it.
#[must_use]
pub fn classify(group: &Group, winning_tile: Tile) -> Wait {
    match group.kind {
        GroupKind::Pair => Wait::Tanki,
        GroupKind::Triple | GroupKind::Quad => Wait::Shanpon,
        GroupKind::Sequence => {
            let start = group.first().map_or(winning_tile.rank(), Tile::rank);
            match (start, winning_tile.rank().saturating_sub(start)) {
                (_, 1) => Wait::Kanchan,
                (1, 2) | (7, 0) => Wait::Penchan,
                _ => Wait::Ryanmen,
            }
        }
    }
}

/// Every distinct wait the winning tile can realize in `groups`, in group
/// order.
///
/// Groups holding a tile strictly equal to the winning tile are preferred;
/// when there are none, groups holding the same identity are used. An empty
/// result means the winning tile is not in the decomposition at all.
#[must_use]
pub fn waits_in(groups: &[Group], winning_tile: Tile) -> Vec<Wait> {
    let holders = |ignore_promotion: bool| {
        groups
            .iter()
            .filter(|g| {
                if ignore_promotion {
                    g.contains_identity(winning_tile)
                } else {
                    g.contains_exact(winning_tile)
                }
            })
            .map(|g| classify(g, winning_tile))
            .collect::<Vec<_>>()
    };

    let mut waits = holders(false);
    if waits.is_empty() {
        waits = holders(true);
    }
    let mut ret: Vec<Wait> = Vec::with_capacity(waits.len());
    for wait in waits {
        if !ret.contains(&wait) {
            ret.push(wait);
        }
    }
    ret
}
