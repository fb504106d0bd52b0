//! Problem sets: loading and bulk verification.
use agari::hand::{parse_tile, parse_tiles};
use agari::{AnalyzeOptions, HandAnalyzer};
use anyhow::{Context, Result, ensure};
use flate2::read::GzDecoder;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Problem {
    pub id: String,
    /// Tenhou notation, winning tile included.
    pub hand: String,
    pub win: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Ok { readings: usize },
    /// Valid input that cannot be read as a complete hand.
    NotWinning,
    Invalid { reason: String },
}

impl Verdict {
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Checked {
    pub id: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Reads a problem set, gunzipping when the file name ends in `.gz`.
pub fn load(path: &Path) -> Result<Vec<Problem>> {
    let inner = || -> Result<_> {
        let file = File::open(path)?;
        let raw = if path.extension().is_some_and(|ext| ext == "gz") {
            io::read_to_string(GzDecoder::new(file))?
        } else {
            io::read_to_string(file)?
        };
        parse(&raw)
    };
    inner().with_context(|| format!("error when reading {}", path.display()))
}

/// Accepts either a single JSON array or one JSON object per line.
pub fn parse(raw: &str) -> Result<Vec<Problem>> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str(line).with_context(|| format!("invalid problem on line {}", i + 1)))
        .collect()
}

pub fn check(problem: &Problem, options: AnalyzeOptions) -> Verdict {
    let inner = || -> Result<usize> {
        let hand = parse_tiles(&problem.hand).context("invalid hand")?;
        let winning_tile = parse_tile(&problem.win).context("invalid winning tile")?;
        ensure!(
            hand.iter().any(|&t| t.same_identity(winning_tile, true)),
            "winning tile {winning_tile} is not in the hand"
        );
        let readings = HandAnalyzer {
            hand: &hand,
            winning_tile,
            options,
        }
        .analyze()?;
        Ok(readings.len())
    };

    match inner() {
        Ok(0) => Verdict::NotWinning,
        Ok(readings) => Verdict::Ok { readings },
        Err(e) => Verdict::Invalid {
            reason: format!("{e:#}"),
        },
    }
}

/// Checks every problem in parallel, keeping input order.
pub fn verify(problems: &[Problem], options: AnalyzeOptions) -> Result<Vec<Checked>> {
    let bar = ProgressBar::new(problems.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] [{wide_bar}] {pos}/{len} ({eta})",
    )?);

    let checked = problems
        .par_iter()
        .progress_with(bar.clone())
        .map(|problem| Checked {
            id: problem.id.clone(),
            verdict: check(problem, options),
        })
        .collect();
    bar.finish_and_clear();

    Ok(checked)
}
