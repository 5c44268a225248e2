use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script against the landing page and print the report as JSON.
    Simulate(SimulateArgs),
    /// Print the stagger start order and per-element offsets as JSON.
    Stagger(StaggerArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stage config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page content JSON (built-in copy when omitted).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct StaggerArgs {
    /// Number of elements.
    #[arg(long)]
    count: usize,

    /// Rank order.
    #[arg(long, value_enum, default_value_t = FromChoice::Start)]
    from: FromChoice,

    /// Delay per rank in milliseconds.
    #[arg(long, default_value_t = 100)]
    each_ms: u64,

    /// Shuffle seed for `--from random`.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FromChoice {
    Start,
    End,
    Center,
    Random,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Stagger(args) => cmd_stagger(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let script: scrollweave::SimulationScript = read_json(&args.in_path, "script")?;
    let config = match &args.config {
        Some(path) => scrollweave::StageConfig::load(path)?,
        None => scrollweave::StageConfig::default(),
    };
    let content = match &args.content {
        Some(path) => read_json::<scrollweave::PageContent>(path, "content")?,
        None => scrollweave::PageContent::default(),
    };

    let report = scrollweave::simulate(config, content, &script)?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serialize report")?;
    println!("{out}");
    Ok(())
}

fn cmd_stagger(args: StaggerArgs) -> anyhow::Result<()> {
    let from = match args.from {
        FromChoice::Start => scrollweave::StaggerFrom::Start,
        FromChoice::End => scrollweave::StaggerFrom::End,
        FromChoice::Center => scrollweave::StaggerFrom::Center,
        FromChoice::Random => scrollweave::StaggerFrom::Random {
            seed: args
                .seed
                .unwrap_or(scrollweave::StageConfig::default().seed),
        },
    };
    let stagger = scrollweave::Stagger::each(scrollweave::Millis(args.each_ms)).from(from);
    let out = serde_json::json!({
        "order": scrollweave::stagger_order(args.count, from),
        "offsets_ms": stagger.offsets(args.count),
    });
    println!("{out}");
    Ok(())
}
