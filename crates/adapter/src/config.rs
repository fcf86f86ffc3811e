//! Driver configuration
//!
//! Every option can come from the environment; the binary layers its command line on top.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::core::{Layout, SessionConfig, DEFAULT_LAYOUT};
use crate::types::DEFAULT_MAX_SHUFFLE_ATTEMPTS;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Built-in layout name or file name under `layout_dir`
    pub layout: String,
    pub layout_dir: PathBuf,
    pub require_solvable: bool,
    /// Shuffle budget per deal; `None` retries forever
    pub max_attempts: Option<u32>,
    /// `None` seeds from the clock
    pub seed: Option<u32>,
    /// Cosmetic, passed through to the front end
    pub background: String,
    /// Silence `[Driver]` logging on stderr
    pub quiet: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            layout_dir: PathBuf::from("layouts"),
            require_solvable: true,
            max_attempts: Some(DEFAULT_MAX_SHUFFLE_ATTEMPTS),
            seed: None,
            background: "default".to_string(),
            quiet: false,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let non_empty = |key: &str| {
            env::var(key)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let layout = non_empty("XMAHJONGG_LAYOUT").unwrap_or(defaults.layout);
        let layout_dir = non_empty("XMAHJONGG_LAYOUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.layout_dir);
        let require_solvable = non_empty("XMAHJONGG_SOLVABLE")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.require_solvable);
        let max_attempts = non_empty("XMAHJONGG_MAX_ATTEMPTS")
            .and_then(|s| s.parse::<u32>().ok())
            .map(attempt_limit)
            .unwrap_or(defaults.max_attempts);
        let seed = non_empty("XMAHJONGG_SEED").and_then(|s| s.parse().ok());
        let background = non_empty("XMAHJONGG_BACKGROUND").unwrap_or(defaults.background);
        let quiet = non_empty("XMAHJONGG_QUIET")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(false);

        Self {
            layout,
            layout_dir,
            require_solvable,
            max_attempts,
            seed,
            background,
            quiet,
        }
    }

    /// Session policy with the seed resolved.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            require_solvable: self.require_solvable,
            max_attempts: self.max_attempts,
            seed: self.seed.unwrap_or_else(clock_seed),
        }
    }

    pub fn load_layout(&self) -> Result<Layout> {
        load_layout(&self.layout, &self.layout_dir)
    }
}

/// `0` means unbounded.
pub fn attempt_limit(n: u32) -> Option<u32> {
    (n > 0).then_some(n)
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive).
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Resolve a layout name: built-in layouts first, then `<dir>/<name>`.
pub fn load_layout(name: &str, dir: &Path) -> Result<Layout> {
    if let Some(layout) = Layout::builtin(name) {
        return Ok(layout);
    }
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading layout {:?} from {}", name, path.display()))?;
    Layout::parse(&text).with_context(|| format!("malformed layout {name:?}"))
}
