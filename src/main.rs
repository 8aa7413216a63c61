use std::error::Error;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use phrasefp::{DetectionStrategy, PhrasefpConfig, scan_message};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Sequence,
    Overlap,
}

impl From<StrategyArg> for DetectionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequence => DetectionStrategy::Sequence,
            StrategyArg::Overlap => DetectionStrategy::Overlap,
        }
    }
}

/// Command-line arguments accepted by the `phrasefp` binary.
#[derive(Parser, Debug)]
#[command(
    name = "phrasefp",
    version,
    about = "Detect noisy occurrences of reference phrases in messages read from stdin"
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PHRASEFP_CONFIG",
        help = "YAML configuration file (default: built-in defaults)"
    )]
    config: Option<PathBuf>,
    #[arg(
        short,
        long = "phrase",
        value_name = "TEXT",
        action = ArgAction::Append,
        help = "Additional phrase to detect, repeatable"
    )]
    phrases: Vec<String>,
    #[arg(
        long,
        value_name = "P",
        help = "Override matcher.match_percent, in (0, 1]"
    )]
    match_percent: Option<f64>,
    #[arg(long, value_enum, help = "Override matcher.strategy")]
    strategy: Option<StrategyArg>,
    #[arg(long, help = "Only print messages with at least one hit")]
    only_matches: bool,
    #[arg(long, help = "Emit logs as JSON on stderr")]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = match &cli.config {
        Some(path) => PhrasefpConfig::from_file(path)?,
        None => PhrasefpConfig::default(),
    };
    config.phrases.extend(cli.phrases);
    if let Some(p) = cli.match_percent {
        config.matcher.match_percent = p;
    }
    if let Some(strategy) = cli.strategy {
        config.matcher.strategy = strategy.into();
    }
    config.validate()?;

    let detector = config.build_detector()?;
    info!(
        config = ?cli.config,
        phrases = detector.len(),
        "scanning stdin"
    );

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut scanned = 0usize;
    let mut hits = 0usize;
    for (line, message) in stdin.lock().lines().enumerate() {
        let message = message?;
        let report = scan_message(&detector, line, &message);
        scanned += 1;
        if report.matched {
            hits += 1;
        } else if cli.only_matches {
            continue;
        }
        serde_json::to_writer(&mut out, &report)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(scanned, hits, "scan complete");
    Ok(())
}
