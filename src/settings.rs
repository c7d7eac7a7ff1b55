//! Runner settings: environment variables first, then command-line flags.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PAIRFALL_SEED` | first match seed (default 1) |
//! | `PAIRFALL_MATCHES` | number of matches (default 1) |
//! | `PAIRFALL_CLEAR_POLICY` | `used-only` or `clear-all` |
//! | `PAIRFALL_BIAS` | `0` / `false` turns the suit bias off |
//! | `PAIRFALL_LOG_PATH` | append a JSONL event journal here |

use std::env;

use anyhow::{anyhow, Result};

use crate::types::{ClearPolicy, GameConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    pub seed: u32,
    pub matches: u32,
    pub quiet: bool,
    pub log_path: Option<String>,
    pub config: GameConfig,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            seed: 1,
            matches: 1,
            quiet: false,
            log_path: None,
            config: GameConfig::default(),
        }
    }
}

impl SimSettings {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`SimSettings::from_env`] with a custom variable source
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        settings.seed = get("PAIRFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(settings.seed);
        settings.matches = get("PAIRFALL_MATCHES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(settings.matches);

        if let Some(policy) = get("PAIRFALL_CLEAR_POLICY").and_then(|s| ClearPolicy::from_str(s.trim())) {
            settings.config.opponent.clear_policy = policy;
        }

        settings.config.bias.enabled = get("PAIRFALL_BIAS")
            .map(|v| {
                let v = v.trim().to_lowercase();
                !(v == "0" || v == "false" || v == "off")
            })
            .unwrap_or(true);

        settings.log_path = get("PAIRFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        settings
    }

    /// Apply `--seed N`, `--matches N`, `--clear-policy P`, `--no-bias` and `--quiet`
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = v
                        .parse()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--matches" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --matches"))?;
                    self.matches = v
                        .parse()
                        .ok()
                        .filter(|&n: &u32| n > 0)
                        .ok_or_else(|| anyhow!("invalid --matches value: {}", v))?;
                }
                "--clear-policy" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --clear-policy"))?;
                    self.config.opponent.clear_policy = ClearPolicy::from_str(v)
                        .ok_or_else(|| anyhow!("invalid --clear-policy value: {}", v))?;
                }
                "--no-bias" => self.config.bias.enabled = false,
                "--quiet" | "-q" => self.quiet = true,
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Environment, then flags, then validation
    pub fn load(args: &[String]) -> Result<Self> {
        let mut settings = Self::from_env();
        settings.apply_args(args)?;
        settings
            .config
            .validate()
            .map_err(|e| anyhow!("invalid configuration: {}", e))?;
        Ok(settings)
    }
}
