//! Tile values, their total order and identity comparison.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, bail, ensure};
use derivative::Derivative;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Number of distinct tile identities (promotion ignored).
pub const IDENTITY_COUNT: usize = 34;

/// Suits in sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// 萬子
    #[default]
    Character,
    /// 筒子
    Circle,
    /// 索子
    Bamboo,
    /// 字牌, ranks 1-7 are East South West North White Green Red.
    Honor,
}

impl Suit {
    #[inline]
    #[must_use]
    pub const fn is_numbered(self) -> bool {
        !matches!(self, Self::Honor)
    }

    #[inline]
    #[must_use]
    pub const fn max_rank(self) -> u8 {
        if self.is_numbered() { 9 } else { 7 }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Character => 'm',
            Self::Circle => 'p',
            Self::Bamboo => 's',
            Self::Honor => 'z',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'm' => Some(Self::Character),
            'p' => Some(Self::Circle),
            's' => Some(Self::Bamboo),
            'z' => Some(Self::Honor),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Character => 0,
            Self::Circle => 1,
            Self::Bamboo => 2,
            Self::Honor => 3,
        }
    }
}

/// A single tile.
///
/// Field order drives the derived ordering: suit, then rank, then plain
/// before promoted. `Eq` and `Hash` are strict, so a promoted 5 and a plain 5
/// are different values; use [`Tile::same_identity`] for grouping purposes.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Derivative, SerializeDisplay, DeserializeFromStr,
)]
#[derivative(Default)]
pub struct Tile {
    suit: Suit,
    #[derivative(Default(value = "1"))]
    rank: u8,
    promoted: bool,
}

impl Tile {
    pub fn new(suit: Suit, rank: u8) -> Result<Self> {
        ensure!(
            (1..=suit.max_rank()).contains(&rank),
            "rank {rank} is out of range for suit {}",
            suit.as_char(),
        );
        Ok(Self {
            suit,
            rank,
            promoted: false,
        })
    }

    /// The promoted 5 of a numbered suit.
    pub fn promoted(suit: Suit) -> Result<Self> {
        ensure!(suit.is_numbered(), "honor tiles cannot be promoted");
        Ok(Self {
            suit,
            rank: 5,
            promoted: true,
        })
    }

    /// Rebuilds a tile from a value in `0..IDENTITY_COUNT`.
    pub fn from_identity_index(idx: usize) -> Result<Self> {
        let (suit, rank) = match idx {
            0..=8 => (Suit::Character, idx + 1),
            9..=17 => (Suit::Circle, idx - 8),
            18..=26 => (Suit::Bamboo, idx - 17),
            27..=33 => (Suit::Honor, idx - 26),
            _ => bail!("identity index {idx} is out of bound"),
        };
        Self::new(suit, rank as u8)
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    #[must_use]
    pub const fn is_promoted(self) -> bool {
        self.promoted
    }

    /// The same tile with the promotion flag cleared.
    #[inline]
    #[must_use]
    pub const fn identity(self) -> Self {
        Self {
            promoted: false,
            ..self
        }
    }

    /// Index of the identity in a 34-slot count table.
    #[inline]
    #[must_use]
    pub const fn identity_index(self) -> usize {
        self.suit.index() * 9 + self.rank as usize - 1
    }

    /// Whether suit and rank match. Unless `ignore_promotion` is set, the
    /// promotion flags must match as well.
    #[inline]
    #[must_use]
    pub fn same_identity(self, other: Self, ignore_promotion: bool) -> bool {
        self.suit == other.suit && self.rank == other.rank && (ignore_promotion || self.promoted == other.promoted)
    }

    /// The tile `n` ranks above in the same numbered suit.
    #[must_use]
    pub fn step(self, n: u8) -> Option<Self> {
        if !self.suit.is_numbered() {
            return None;
        }
        let rank = self.rank.checked_add(n)?;
        Self::new(self.suit, rank).ok()
    }

    /// 1 and 9 of the numbered suits, plus every honor.
    #[inline]
    #[must_use]
    pub const fn is_terminal_or_honor(self) -> bool {
        !self.suit.is_numbered() || self.rank == 1 || self.rank == 9
    }

    #[must_use]
    pub const fn honor_name(self) -> Option<&'static str> {
        if self.suit.is_numbered() {
            return None;
        }
        Some(match self.rank {
            1 => "East",
            2 => "South",
            3 => "West",
            4 => "North",
            5 => "White",
            6 => "Green",
            _ => "Red",
        })
    }
}

/// Total order over tiles, see [`Tile`].
#[inline]
#[must_use]
pub fn compare(a: &Tile, b: &Tile) -> Ordering {
    a.cmp(b)
}

/// Sorts in place. Stable, so equal tiles keep their relative order.
pub fn sort_tiles(tiles: &mut [Tile]) {
    tiles.sort_by(compare);
}

/// Returns a sorted copy and leaves `tiles` as is.
#[must_use]
pub fn sorted_tiles(tiles: &[Tile]) -> Vec<Tile> {
    let mut ret = tiles.to_vec();
    sort_tiles(&mut ret);
    ret
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = if self.promoted { 0 } else { self.rank };
        write!(f, "{rank}{}", self.suit.as_char())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::hand::parse_tile(s)
    }
}
