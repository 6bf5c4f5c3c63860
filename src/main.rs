use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use commitbrute::io_utils::brute_cli_error;
use commitbrute::{
    git, has_prefix, message_body, object_id_with_dates, SearchConfig, Searcher, Solution,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Brute-force a git commit hash prefix by adjusting HEAD's dates.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Desired prefix
    #[arg(long, default_value = "bf")]
    prefix: String,

    /// Re-run, even if current hash matches prefix
    #[arg(long)]
    force: bool,

    /// Number of CPUs to use. Defaults to number of processors.
    #[arg(long)]
    cpus: Option<usize>,

    /// Repository to operate on
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Find the dates but leave HEAD alone
    #[arg(long)]
    dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    no_progress: bool,
}

/// `--json` output.
#[derive(Serialize)]
struct Report<'a> {
    solution: &'a Solution,
    hash: &'a str,
    attempts: u64,
    elapsed_ms: u128,
    amended: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn spinner(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] searching for {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let mut config =
        SearchConfig::new(&args.prefix).map_err(|e| brute_cli_error("invalid arguments", e))?;
    if let Some(cpus) = args.cpus {
        config = config
            .with_workers(cpus)
            .map_err(|e| brute_cli_error("invalid arguments", e))?;
    }

    let head = git::head_hash(&args.repo).map_err(|e| brute_cli_error("reading HEAD", e))?;
    if has_prefix(&head, &config.prefix) && !args.force {
        log::info!("HEAD {head} already starts with {}", config.prefix);
        return Ok(());
    }

    let obj = git::cat_commit(&args.repo, &head)
        .map_err(|e| brute_cli_error("reading HEAD commit", e))?;
    let message = message_body(&obj).map_err(|e| brute_cli_error("reading HEAD commit", e))?;

    let progress = (!args.no_progress && !args.json).then(|| spinner(&config.prefix));
    let searcher = Searcher::new(config.clone());
    let outcome = searcher.search(&obj);
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let outcome = outcome.map_err(|e| brute_cli_error("searching", e))?;
    let solution = &outcome.solution;

    let mut hash = object_id_with_dates(&obj, &solution.author, &solution.committer)
        .map_err(|e| brute_cli_error("verifying solution", e))?;

    if !args.dry_run {
        git::amend(&args.repo, solution, message)
            .map_err(|e| brute_cli_error("amending HEAD", e))?;
        let new_head =
            git::head_hash(&args.repo).map_err(|e| brute_cli_error("reading HEAD", e))?;
        if new_head != hash {
            log::warn!(
                "amended HEAD is {new_head}, expected {hash}; git rewrote more than the dates"
            );
        }
        hash = new_head;
    }

    if args.json {
        let out = Report {
            solution,
            hash: &hash,
            attempts: outcome.attempts,
            elapsed_ms: outcome.elapsed.as_millis(),
            amended: !args.dry_run,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("author date:    {}", solution.author);
        println!("committer date: {}", solution.committer);
        println!("hash:           {hash}");
    }

    Ok(())
}
