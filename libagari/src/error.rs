use crate::tile::Tile;
use std::fmt;

/// Input rejected before any search happens. A hand that simply has no
/// winning shape is not an error, it yields an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// 手牌の枚数が不正
    InvalidHandSize { expected: usize, actual: usize },
    /// 同じ牌が5枚以上
    InvalidTileMultiplicity { tile: Tile, count: usize },
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::InvalidHandSize { expected, actual } => {
                write!(f, "hand must contain exactly {expected} tiles, got {actual}")
            }
            AnalyzeError::InvalidTileMultiplicity { tile, count } => {
                write!(f, "{tile} appears {count} times, at most 4 are allowed")
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;
