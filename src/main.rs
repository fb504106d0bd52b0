mod problem;
mod report;

use agari::hand::{parse_tile, parse_tiles};
use agari::{AnalyzeOptions, HandAnalyzer, Wait};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Lists every way a complete riichi hand can be read
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON file with analyzer options, flags below take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not try the seven pairs form
    #[arg(long, global = true)]
    no_seven_pairs: bool,

    /// Do not try the thirteen orphans form
    #[arg(long, global = true)]
    no_thirteen_orphans: bool,

    /// Tag thirteen orphans readings as a tanki wait
    #[arg(long, global = true)]
    orphans_tanki: bool,
}

impl OptionArgs {
    fn load(&self) -> Result<AnalyzeOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))?
            }
            None => AnalyzeOptions::default(),
        };
        if self.no_seven_pairs {
            options.seven_pairs = false;
        }
        if self.no_thirteen_orphans {
            options.thirteen_orphans = false;
        }
        if self.orphans_tanki {
            options.thirteen_orphans_wait = Some(Wait::Tanki);
        }
        Ok(options)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decompose a single hand
    Analyze {
        /// The 14 tiles including the winning one, e.g. "123m 406p 567s 789s 11z"
        hand: String,

        /// The winning tile, e.g. "0p"
        #[arg(short, long)]
        win: String,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Check a problem set and list every problem that is not a winning hand
    Verify {
        /// JSON array or JSON lines of {"id", "hand", "win"}, optionally gzipped
        file: PathBuf,

        /// Print every verdict as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let mut builder = env_logger::Builder::new();
    builder.filter(None, level).format_timestamp(None).format_target(false);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let options = cli.options.load()?;
    log::debug!("options: {options:?}");

    match cli.command {
        Command::Analyze { hand, win, json } => {
            let hand = parse_tiles(&hand).context("invalid hand")?;
            let winning_tile = parse_tile(&win).context("invalid winning tile")?;
            let readings = HandAnalyzer {
                hand: &hand,
                winning_tile,
                options,
            }
            .analyze()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&readings)?);
            } else {
                print!("{}", report::readings_to_string(&hand, winning_tile, &readings));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { file, json } => {
            let problems = problem::load(&file)?;
            log::info!("loaded {} problems from {}", problems.len(), file.display());

            let checked = problem::verify(&problems, options)?;
            if json {
                for c in &checked {
                    println!("{}", serde_json::to_string(c)?);
                }
            } else {
                print!("{}", report::verdicts_to_string(&checked));
            }

            let all_good = checked.iter().all(|c| c.verdict.is_ok());
            Ok(if all_good { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
