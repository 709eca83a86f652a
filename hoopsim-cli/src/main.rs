mod commentary;
mod logic;
mod util;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use hoopsim_game::{MatchEngine, PlayerId, Roster, SimError};
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use commentary::{CommentaryMode, commentary_for};
use logic::reports::{
    generate_console_report, generate_csv_report, generate_json_report, generate_markdown_report,
};
use logic::{
    ReportInput, RuleOverrides, aggregate, expand_iterations, resolve_match_config,
    resolve_seed_inputs, run_batch,
};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "hoopsim-cli", version = "0.1.0")]
#[command(about = "Seeded one-on-one basketball matchups from a JSON player roster")]
struct Args {
    /// Roster file: a JSON array of player records
    #[arg(long, default_value = "data/players.json")]
    roster: PathBuf,

    /// List roster players and exit
    #[arg(long)]
    list_players: bool,

    /// Id of the first player
    #[arg(long)]
    player1: Option<String>,

    /// Id of the second player
    #[arg(long)]
    player2: Option<String>,

    /// Seeds to run (comma-separated; integers, ranges like 1..10, or `now`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Consecutive seeds to run from each listed seed
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file with match rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// Points needed to win
    #[arg(long, allow_negative_numbers = true)]
    target: Option<i32>,

    /// Required winning margin
    #[arg(long)]
    win_by: Option<u32>,

    /// Scorer keeps the ball
    #[arg(long)]
    make_it_take_it: bool,

    /// Ones and twos instead of twos and threes
    #[arg(long)]
    streetball: bool,

    /// Commentary for the first seed
    #[arg(long, value_enum, default_value_t = CommentaryMode::Off)]
    commentary: CommentaryMode,

    /// Endpoint of the commentary service (http mode only)
    #[arg(long, default_value = "http://127.0.0.1:8080/commentary")]
    endpoint: String,

    /// Commentary request timeout in seconds
    #[arg(long, default_value_t = 10)]
    commentary_timeout: u64,

    /// Include the play-by-play of the first seed in console reports
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    const fn overrides(&self) -> RuleOverrides {
        RuleOverrides {
            target: self.target,
            win_by: self.win_by,
            make_it_take_it: self.make_it_take_it,
            streetball: self.streetball,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let roster = load_roster(&args.roster)?;
    if maybe_list_players(&args, &roster)? {
        return Ok(());
    }

    announce_banner();

    let config = resolve_match_config(args.config.as_deref(), args.overrides())?;
    let (player1, player2) = matchup_ids(&args)?;
    let seeds = expand_iterations(&resolve_seed_inputs(&split_csv(&args.seeds))?, args.iterations);

    let engine = Arc::new(MatchEngine::with_config(roster, config));
    let outcome = run_batch(Arc::clone(&engine), &player1, &player2, &seeds).await;
    let (records, elapsed) = match outcome {
        Ok(batch) => batch,
        Err(err) => {
            if let Some(sim) = err.downcast_ref::<SimError>() {
                log::debug!("simulation failed: {sim}");
                eprintln!("❌ {}", sim.user_message().red());
                std::process::exit(1);
            }
            return Err(err);
        }
    };

    let summary = aggregate(&records, elapsed);
    let commentary = match records.first() {
        Some(record) => {
            commentary_for(
                args.commentary,
                &args.endpoint,
                Duration::from_secs(args.commentary_timeout),
                &record.result,
            )
            .await
        }
        None => None,
    };

    write_reports(
        &args,
        &ReportInput {
            records: &records,
            aggregate: summary.as_ref(),
            commentary: commentary.as_ref(),
            config: engine.config(),
            show_plays: args.verbose,
        },
    )
}

fn load_roster(path: &Path) -> Result<Roster> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    Roster::from_json(&raw).with_context(|| format!("failed to parse roster {}", path.display()))
}

fn maybe_list_players(args: &Args, roster: &Roster) -> Result<bool> {
    if !args.list_players {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available players:")?;
    for player in roster.players() {
        writeln!(
            output_target.writer(),
            "  {:>6}  {:25} {:3} {}",
            player.id.as_str(),
            player.name,
            player.position.abbreviation(),
            player.team
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    eprintln!("{}", "🏀 Hoopsim One-on-One".bright_cyan().bold());
    eprintln!("{}", "=====================".cyan());
}

fn matchup_ids(args: &Args) -> Result<(PlayerId, PlayerId)> {
    let (Some(player1), Some(player2)) = (args.player1.as_deref(), args.player2.as_deref()) else {
        bail!("--player1 and --player2 are required (use --list-players to see ids)");
    };
    Ok((PlayerId::new(player1), PlayerId::new(player2)))
}

fn write_reports(args: &Args, input: &ReportInput<'_>) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, input)?,
        "markdown" => generate_markdown_report(&mut output_target, input)?,
        "csv" => generate_csv_report(&mut output_target, input.records)?,
        _ => generate_console_report(&mut output_target, input)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
