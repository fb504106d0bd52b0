//! Whole-hand forms that bypass the four-groups-and-a-pair rule.
use crate::group::{Group, detect_pair, remove_many};
use crate::tile::{IDENTITY_COUNT, Tile};

/// Identity counts of a hand, promotion ignored.
#[must_use]
pub fn identity_counts(tiles: &[Tile]) -> [u8; IDENTITY_COUNT] {
    let mut counts = [0; IDENTITY_COUNT];
    for tile in tiles {
        counts[tile.identity_index()] += 1;
    }
    counts
}

/// 国士無双: every terminal and honor identity present, exactly one of them
/// twice, nothing else.
#[must_use]
pub fn is_thirteen_orphans(tiles: &[Tile]) -> bool {
    if tiles.len() != 14 || !tiles.iter().all(|t| t.is_terminal_or_honor()) {
        return false;
    }
    // 14 tiles over the 13 yaokyuu identities leaves room for one duplicate
    identity_counts(tiles).iter().filter(|&&c| c > 0).count() == 13
}

/// 七対子: seven pairs of distinct identities. Four of a kind does not count
/// as two pairs.
///
/// Returns the pairs in sorted order, holding the physical tiles found.
#[must_use]
pub fn seven_pairs(sorted: &[Tile]) -> Option<Vec<Group>> {
    if sorted.len() != 14 {
        return None;
    }
    let counts = identity_counts(sorted);
    if counts.iter().any(|&c| c != 0 && c != 2) {
        return None;
    }

    let mut rest = sorted.to_vec();
    let mut pairs = Vec::with_capacity(7);
    while let Some(&head) = rest.first() {
        let found = detect_pair(&rest, head)?;
        rest = remove_many(&rest, &found);
        pairs.push(Group::pair(found));
    }
    (pairs.len() == 7).then_some(pairs)
}
