//! Decomposition of complete riichi mahjong hands.
//!
//! A 14-tile hand is split into every structurally valid reading: four
//! groups and a head pair, seven pairs, or thirteen orphans. Each standard
//! reading is tagged with the wait the winning tile completed.
//!
//! ```
//! use agari::{Tile, analyze, hand::parse_tiles};
//!
//! let hand = parse_tiles("123m 456p 567s 789s 11z").unwrap();
//! let win: Tile = "5s".parse().unwrap();
//! let readings = analyze(&hand, win).unwrap();
//! assert_eq!(readings.len(), 1);
//! assert_eq!(readings[0].to_string(), "(11z) [123m] [456p] [567s] [789s] ryanmen");
//! ```
pub mod algo;
pub mod error;
pub mod group;
pub mod hand;
pub mod tile;

pub use algo::agari::{AnalyzeOptions, Decomposition, Form, HandAnalyzer, analyze};
pub use algo::machi::Wait;
pub use error::{AnalyzeError, AnalyzeResult};
pub use group::{Group, GroupKind};
pub use tile::{Suit, Tile};
