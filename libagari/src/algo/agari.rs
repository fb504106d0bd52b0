//! Exhaustive decomposition of a complete 14-tile hand.
//!
//! Standard hands are searched by backtracking: every identity that occurs at
//! least twice is tried as the head pair, then the remaining tiles are split
//! into four groups anchored at the lowest tile left, trying a sequence and a
//! triple at each step. Seven pairs and thirteen orphans are checked on the
//! side. A hand can legitimately read several ways, so the output is the full
//! list of readings, each tagged with how the winning tile completed it.
use super::machi::{Wait, waits_in};
use super::special::{identity_counts, is_thirteen_orphans, seven_pairs};
use crate::error::{AnalyzeError, AnalyzeResult};
use crate::group::{Group, GroupKind, detect_pair, detect_sequence, detect_triple, pair_candidates, remove_many};
use crate::hand::tiles_to_string;
use crate::tile::{Tile, sorted_tiles};
use std::fmt;

use ahash::AHashSet;
use derivative::Derivative;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// 13 concealed tiles plus the winning tile.
pub const HAND_SIZE: usize = 14;
/// Copies of each identity in a set.
pub const MAX_COPIES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct AnalyzeOptions {
    #[derivative(Default(value = "true"))]
    pub seven_pairs: bool,
    #[derivative(Default(value = "true"))]
    pub thirteen_orphans: bool,
    /// Wait attached to a thirteen orphans reading. The form has no groups to
    /// derive one from, so it is left to the rule set.
    pub thirteen_orphans_wait: Option<Wait>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    /// 四面子一雀頭
    Standard,
    /// 七対子
    SevenPairs,
    /// 国士無双
    ThirteenOrphans,
}

/// One reading of the hand.
///
/// For [`Form::Standard`], `groups[0]` is the head pair and the four groups
/// follow in search order. Seven pairs holds seven pair groups. Thirteen
/// orphans holds none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub form: Form,
    pub groups: Vec<Group>,
    /// Always set for the standard form and seven pairs.
    pub wait: Option<Wait>,
}

impl Decomposition {
    #[inline]
    #[must_use]
    pub fn is_standard(&self) -> bool {
        self.form == Form::Standard
    }

    /// The head pair of a standard reading.
    #[must_use]
    pub fn pair(&self) -> Option<&Group> {
        if !self.is_standard() {
            return None;
        }
        self.groups.iter().find(|g| g.kind == GroupKind::Pair)
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter().filter(|g| g.kind == GroupKind::Sequence)
    }

    /// Triples and quads.
    pub fn triples(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups
            .iter()
            .filter(|g| matches!(g.kind, GroupKind::Triple | GroupKind::Quad))
    }

    /// Every tile held by the groups.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.groups.iter().flat_map(|g| g.tiles.iter().copied()).collect()
    }

    /// Order-insensitive identity used for deduplication.
    fn key(&self) -> (Form, Vec<Group>, Option<Wait>) {
        let mut groups: Vec<_> = self.groups.iter().map(Group::canonical).collect();
        groups.sort_unstable();
        (self.form, groups, self.wait)
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            Form::ThirteenOrphans => f.write_str("thirteen orphans")?,
            _ => {
                let groups = self.groups.iter().map(ToString::to_string).collect::<Vec<_>>();
                f.write_str(&groups.join(" "))?;
            }
        }
        if let Some(wait) = self.wait {
            write!(f, " {wait}")?;
        }
        Ok(())
    }
}

/// Decomposes one hand.
#[derive(Debug, Clone, Copy)]
pub struct HandAnalyzer<'a> {
    /// Must include the winning tile, order does not matter.
    pub hand: &'a [Tile],
    /// Must be one of the tiles in `hand`. It is not checked; a missing
    /// winning tile only degrades the wait tags.
    pub winning_tile: Tile,
    pub options: AnalyzeOptions,
}

impl HandAnalyzer<'_> {
    /// All structurally valid readings. An empty list means the hand is not a
    /// winning shape.
    pub fn analyze(&self) -> AnalyzeResult<Vec<Decomposition>> {
        let sorted = self.validate()?;
        let mut readings = vec![];

        if self.options.thirteen_orphans && is_thirteen_orphans(&sorted) {
            readings.push(Decomposition {
                form: Form::ThirteenOrphans,
                groups: vec![],
                wait: self.options.thirteen_orphans_wait,
            });
        }
        if self.options.seven_pairs
            && let Some(pairs) = seven_pairs(&sorted)
        {
            readings.push(Decomposition {
                form: Form::SevenPairs,
                groups: pairs,
                wait: Some(Wait::Tanki),
            });
        }

        for groups in standard_structures(&sorted) {
            let mut waits = waits_in(&groups, self.winning_tile);
            if waits.is_empty() {
                warn!(
                    "winning tile {} is not part of {}, tagging as tanki",
                    self.winning_tile,
                    tiles_to_string(&sorted),
                );
                waits.push(Wait::Tanki);
            }
            for wait in waits {
                readings.push(Decomposition {
                    form: Form::Standard,
                    groups: groups.clone(),
                    wait: Some(wait),
                });
            }
        }

        let ret = dedup(readings);
        debug!(
            "{} + {}: {} decomposition(s)",
            tiles_to_string(&sorted),
            self.winning_tile,
            ret.len(),
        );
        Ok(ret)
    }

    /// Checks size and multiplicity, returning a sorted copy of the hand.
    fn validate(&self) -> AnalyzeResult<Vec<Tile>> {
        if self.hand.len() != HAND_SIZE {
            return Err(AnalyzeError::InvalidHandSize {
                expected: HAND_SIZE,
                actual: self.hand.len(),
            });
        }
        let sorted = sorted_tiles(self.hand);
        let counts = identity_counts(&sorted);
        if let Some(tile) = sorted.iter().find(|t| counts[t.identity_index()] as usize > MAX_COPIES) {
            return Err(AnalyzeError::InvalidTileMultiplicity {
                tile: tile.identity(),
                count: counts[tile.identity_index()] as usize,
            });
        }
        Ok(sorted)
    }
}

/// [`HandAnalyzer::analyze`] with default options.
pub fn analyze(hand: &[Tile], winning_tile: Tile) -> AnalyzeResult<Vec<Decomposition>> {
    HandAnalyzer {
        hand,
        winning_tile,
        options: AnalyzeOptions::default(),
    }
    .analyze()
}

/// Every head pair plus four groups reading of a sorted hand, in search order.
/// The same group multiset may show up more than once.
#[must_use]
pub fn standard_structures(sorted: &[Tile]) -> Vec<Vec<Group>> {
    let mut ret = vec![];
    for candidate in pair_candidates(sorted) {
        let Some(pair) = detect_pair(sorted, candidate) else {
            continue;
        };
        trace!("trying head pair {candidate}");
        let rest = remove_many(sorted, &pair);
        let mut stack = vec![Group::pair(pair)];
        search_groups(&rest, 4, &mut stack, &mut ret);
    }
    ret
}

/// `rest` must stay sorted so that its first tile is the lowest one.
fn search_groups(rest: &[Tile], needed: usize, stack: &mut Vec<Group>, out: &mut Vec<Vec<Group>>) {
    let Some(&anchor) = rest.first() else {
        if needed == 0 {
            out.push(stack.clone());
        }
        return;
    };
    if needed == 0 {
        return;
    }

    if let Some(found) = detect_sequence(rest, anchor) {
        stack.push(Group::sequence(found));
        search_groups(&remove_many(rest, &found), needed - 1, stack, out);
        stack.pop();
    }
    if let Some(found) = detect_triple(rest, anchor) {
        stack.push(Group::triple(found));
        search_groups(&remove_many(rest, &found), needed - 1, stack, out);
        stack.pop();
    }
}

/// Keeps the first of every set of readings with the same group multiset,
/// form and wait.
fn dedup(readings: Vec<Decomposition>) -> Vec<Decomposition> {
    let mut seen = AHashSet::new();
    readings.into_iter().filter(|d| seen.insert(d.key())).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hand::hand;

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn run(tiles: &str, win: &str) -> Vec<Decomposition> {
        analyze(&hand(tiles), tile(win)).unwrap()
    }

    fn waits(ds: &[Decomposition]) -> Vec<Wait> {
        let mut ret: Vec<_> = ds.iter().filter_map(|d| d.wait).collect();
        ret.sort_unstable();
        ret
    }

    #[test]
    fn single_reading() {
        let ds = run("123m 456p 567s 789s 11z", "5s");
        assert_eq!(ds.len(), 1);
        let d = &ds[0];
        assert_eq!(d.form, Form::Standard);
        assert_eq!(d.wait, Some(Wait::Ryanmen));
        assert_eq!(d.groups.len(), 5);
        assert_eq!(d.pair().unwrap().tiles.as_slice(), hand("11z"));
        assert_eq!(d.sequences().count(), 4);
        assert_eq!(d.to_string(), "(11z) [123m] [456p] [567s] [789s] ryanmen");
    }

    #[test]
    fn several_waits_for_one_structure() {
        let ds = run("11112233m 456p 789s", "1m");
        assert!(ds.len() >= 2);
        assert!(ds.iter().all(|d| d.is_standard()));
        assert_eq!(waits(&ds), [Wait::Tanki, Wait::Ryanmen]);
    }

    #[test]
    fn several_structures() {
        let ds = run("111222333m 456p 77s", "1m");
        assert_eq!(ds.len(), 2);
        assert_eq!(waits(&ds), [Wait::Shanpon, Wait::Ryanmen]);
        let triples = ds.iter().find(|d| d.wait == Some(Wait::Shanpon)).unwrap();
        assert_eq!(triples.triples().count(), 3);
        let runs = ds.iter().find(|d| d.wait == Some(Wait::Ryanmen)).unwrap();
        assert_eq!(runs.sequences().count(), 4);
    }

    #[test]
    fn identical_readings_collapse() {
        // the winning tile sits in two identical runs
        let ds = run("112233m 456p 789s 55z", "1m");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].wait, Some(Wait::Ryanmen));

        let ds = run("11122233m 456p 789s", "2m");
        let keys: AHashSet<_> = ds.iter().map(Decomposition::key).collect();
        assert_eq!(keys.len(), ds.len());
    }

    #[test]
    fn literal_waits() {
        assert_eq!(waits(&run("123m 456p 234s 789s 11z", "3m")), [Wait::Penchan]);
        assert_eq!(waits(&run("123m 567p 234s 789s 11z", "6p")), [Wait::Kanchan]);
        assert_eq!(waits(&run("123m 456p 234s 789s 77m", "7m")), [Wait::Tanki]);
        assert_eq!(waits(&run("123m 456p 234s 789s 11z", "7s")), [Wait::Penchan]);
        assert_eq!(waits(&run("123m 456p 234s 55s 111z", "1z")), [Wait::Shanpon]);
    }

    #[test]
    fn promoted_tiles() {
        let ds = run("123m 406p 234s 789s 11z", "0p");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].wait, Some(Wait::Kanchan));
        assert!(ds[0].tiles().iter().any(|t| t.is_promoted()));

        let ds = run("123m 456p 055s 789s 11z", "0s");
        assert_eq!(waits(&ds), [Wait::Shanpon]);
        for d in &ds {
            let mut tiles = d.tiles();
            tiles.sort();
            assert_eq!(tiles, sorted_tiles(&hand("123m 456p 055s 789s 11z")));
        }
    }

    #[test]
    fn seven_pairs_form() {
        let ds = run("11m 22p 33s 44m 55p 66s 77m", "7m");
        let chiitoi: Vec<_> = ds.iter().filter(|d| d.form == Form::SevenPairs).collect();
        assert_eq!(chiitoi.len(), 1);
        assert_eq!(chiitoi[0].groups.len(), 7);
        assert!(chiitoi[0].groups.iter().all(|g| g.kind == GroupKind::Pair));
        assert_eq!(chiitoi[0].wait, Some(Wait::Tanki));
        assert!(chiitoi[0].pair().is_none());

        // also reads as a standard hand
        let ds = run("112233m 445566p 77s", "7s");
        assert!(ds.iter().any(|d| d.form == Form::SevenPairs));
        assert!(ds.iter().any(|d| d.is_standard()));

        let ds = run("1111m 22p 33p 44p 55s 66s", "6s");
        assert!(ds.iter().all(|d| d.form != Form::SevenPairs));
    }

    #[test]
    fn thirteen_orphans_form() {
        let base = hand("19m 19p 19s 1234567z");
        for extra in &base {
            let mut tiles = base.clone();
            tiles.insert(0, *extra);
            let ds = analyze(&tiles, *extra).unwrap();
            assert_eq!(ds.len(), 1, "failed for duplicate {extra}");
            assert_eq!(ds[0].form, Form::ThirteenOrphans);
            assert!(ds[0].groups.is_empty());
            assert_eq!(ds[0].wait, None);
        }
    }

    #[test]
    fn options() {
        let tiles = hand("19m 19p 19s 1234567z 9s");
        let analyzer = HandAnalyzer {
            hand: &tiles,
            winning_tile: tile("9s"),
            options: AnalyzeOptions {
                thirteen_orphans_wait: Some(Wait::Tanki),
                ..Default::default()
            },
        };
        assert_eq!(analyzer.analyze().unwrap()[0].wait, Some(Wait::Tanki));

        let analyzer = HandAnalyzer {
            options: AnalyzeOptions {
                thirteen_orphans: false,
                ..Default::default()
            },
            ..analyzer
        };
        assert!(analyzer.analyze().unwrap().is_empty());

        let tiles = hand("11m 22p 33s 44m 55p 66s 77m");
        let analyzer = HandAnalyzer {
            hand: &tiles,
            winning_tile: tile("7m"),
            options: AnalyzeOptions {
                seven_pairs: false,
                ..Default::default()
            },
        };
        assert!(analyzer.analyze().unwrap().is_empty());

        let defaults = AnalyzeOptions::default();
        assert!(defaults.seven_pairs && defaults.thirteen_orphans);
        assert_eq!(defaults.thirteen_orphans_wait, None);
    }

    #[test]
    fn not_a_winning_shape() {
        assert!(run("135m 246p 135s 12345z", "1m").is_empty());
        assert!(run("123456789m 1234z 5z", "5z").is_empty());
    }

    #[test]
    fn missing_winning_tile() {
        let ds = run("123m 456p 567s 789s 11z", "9m");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].wait, Some(Wait::Tanki));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            analyze(&hand("123m"), tile("1m")).unwrap_err(),
            AnalyzeError::InvalidHandSize {
                expected: 14,
                actual: 3
            },
        );
        assert_eq!(
            analyze(&hand("123m 456p 567s 789s 11z 1z"), tile("1m")).unwrap_err(),
            AnalyzeError::InvalidHandSize {
                expected: 14,
                actual: 15
            },
        );
        assert_eq!(
            analyze(&hand("11111m 23m 456p 789s 1z"), tile("1m")).unwrap_err(),
            AnalyzeError::InvalidTileMultiplicity {
                tile: tile("1m"),
                count: 5
            },
        );
        // promoted copies count toward the same identity
        assert!(matches!(
            analyze(&hand("05555p 123m 789s 1z 2z"), tile("5p")),
            Err(AnalyzeError::InvalidTileMultiplicity { count: 5, .. }),
        ));
    }

    #[test]
    fn input_untouched() {
        let tiles = hand("9s 123m 11z 456p 567s 78s");
        let original = tiles.clone();
        run("9s 123m 11z 456p 567s 78s", "5s");
        analyze(&tiles, tile("5s")).unwrap();
        assert_eq!(tiles, original);
    }

    #[test]
    fn serialize() {
        let ds = run("123m 456p 567s 789s 11z", "5s");
        let json = serde_json::to_value(&ds[0]).unwrap();
        assert_eq!(json["form"], "standard");
        assert_eq!(json["wait"], "ryanmen");
        assert_eq!(json["groups"][0]["kind"], "pair");
        assert_eq!(json["groups"][0]["tiles"][0], "1z");

        let options: AnalyzeOptions = serde_json::from_str(r#"{"thirteen_orphans_wait":"tanki"}"#).unwrap();
        assert!(options.seven_pairs);
        assert_eq!(options.thirteen_orphans_wait, Some(Wait::Tanki));
    }
}
