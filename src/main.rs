//! Session driver (default binary).
//!
//! Deals a game and serves the line-delimited JSON protocol on stdin/stdout until stdin
//! closes. Log lines go to stderr so they never mix with protocol replies.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use xmahjongg::adapter::config::{attempt_limit, parse_bool};
use xmahjongg::adapter::{Driver, DriverConfig};
use xmahjongg::core::BUILTIN_LAYOUTS;

#[derive(Parser, Debug)]
#[command(
    name = "xmahjongg",
    version,
    about = "Mahjongg solitaire engine driven over line-delimited JSON"
)]
struct Cli {
    /// Layout to play: a built-in name (pyramid, flat) or a file in the layout directory
    #[arg(short, long)]
    layout: Option<String>,

    /// Directory searched for layout files
    #[arg(long)]
    layout_dir: Option<PathBuf>,

    /// Reject deals that stack three tiles of one family (true/false)
    #[arg(short, long, value_parser = parse_solvable)]
    solvable: Option<bool>,

    /// Shuffle budget per deal, 0 for unbounded
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Fixed RNG seed for reproducible deals
    #[arg(long)]
    seed: Option<u32>,

    /// Background name or RRGGBB value, passed through to the front end
    #[arg(short, long)]
    background: Option<String>,

    /// Do not log to stderr
    #[arg(short, long)]
    quiet: bool,

    /// List the built-in layouts and exit
    #[arg(long)]
    list_layouts: bool,
}

fn parse_solvable(s: &str) -> Result<bool, String> {
    parse_bool(s).ok_or_else(|| format!("expected true or false, got {s:?}"))
}

impl Cli {
    /// Command-line values override the environment.
    fn into_config(self) -> DriverConfig {
        let mut config = DriverConfig::from_env();
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(dir) = self.layout_dir {
            config.layout_dir = dir;
        }
        if let Some(solvable) = self.solvable {
            config.require_solvable = solvable;
        }
        if let Some(n) = self.max_attempts {
            config.max_attempts = attempt_limit(n);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        config.quiet |= self.quiet;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.list_layouts {
        for entry in BUILTIN_LAYOUTS {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    let config = cli.into_config();
    let quiet = config.quiet;
    if !quiet {
        eprintln!("[xmahjongg] running v{}", env!("CARGO_PKG_VERSION"));
    }

    let mut driver = Driver::new(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    driver.run(stdin.lock(), BufWriter::new(stdout.lock()))?;

    if !quiet {
        eprintln!("[xmahjongg] exit");
    }
    Ok(())
}
