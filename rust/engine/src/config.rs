use serde::{Deserialize, Serialize};
use std::fs;

use crate::errors::ConfigError;
use crate::player::{DEFAULT_BET, STARTING_CHIPS};
use crate::shoe::{MAX_DECKS, MIN_DECKS};

/// Table rules and display options applied atomically by `configure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub decks_in_shoe: u8,
    pub show_hand_score: bool,
    pub show_shoe_count: bool,
    pub dealer_hits_soft_17: bool,
    pub allow_double_after_split: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            decks_in_shoe: 6,
            show_hand_score: true,
            show_shoe_count: false,
            dealer_hits_soft_17: true,
            allow_double_after_split: true,
        }
    }
}

impl TableConfig {
    /// Same config with the deck count forced into `[1, 8]`.
    pub fn clamped(mut self) -> Self {
        self.decks_in_shoe = self.decks_in_shoe.clamp(MIN_DECKS, MAX_DECKS);
        self
    }
}

/// Everything needed to open a session at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub table: TableConfig,
    pub starting_chips: u64,
    pub initial_bet: u64,
    /// Shuffle seed; `None` draws one at random
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            starting_chips: STARTING_CHIPS,
            initial_bet: DEFAULT_BET,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub decks_in_shoe: ValueSource,
    pub show_hand_score: ValueSource,
    pub show_shoe_count: ValueSource,
    pub dealer_hits_soft_17: ValueSource,
    pub allow_double_after_split: ValueSource,
    pub starting_chips: ValueSource,
    pub initial_bet: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks_in_shoe: ValueSource::Default,
            show_hand_score: ValueSource::Default,
            show_shoe_count: ValueSource::Default,
            dealer_hits_soft_17: ValueSource::Default,
            allow_double_after_split: ValueSource::Default,
            starting_chips: ValueSource::Default,
            initial_bet: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: SessionConfig,
    pub sources: ConfigSources,
}

pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";

pub fn load() -> Result<SessionConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `BLACKJACK_CONFIG`, then
/// `BLACKJACK_*` environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = SessionConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(seed) = env_value("BLACKJACK_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(decks) = env_value("BLACKJACK_DECKS") {
        cfg.table.decks_in_shoe = decks
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid deck count".into()))?;
        sources.decks_in_shoe = ValueSource::Env;
    }
    if let Some(chips) = env_value("BLACKJACK_CHIPS") {
        cfg.starting_chips = chips
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting chips".into()))?;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(h17) = env_value("BLACKJACK_H17") {
        cfg.table.dealer_hits_soft_17 = parse_bool(&h17)
            .ok_or_else(|| ConfigError::Invalid("Invalid dealer_hits_soft_17".into()))?;
        sources.dealer_hits_soft_17 = ValueSource::Env;
    }
    if let Some(das) = env_value("BLACKJACK_DAS") {
        cfg.table.allow_double_after_split = parse_bool(&das)
            .ok_or_else(|| ConfigError::Invalid("Invalid allow_double_after_split".into()))?;
        sources.allow_double_after_split = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    decks_in_shoe: Option<u8>,
    #[serde(default)]
    show_hand_score: Option<bool>,
    #[serde(default)]
    show_shoe_count: Option<bool>,
    #[serde(default)]
    dealer_hits_soft_17: Option<bool>,
    #[serde(default)]
    allow_double_after_split: Option<bool>,
    #[serde(default)]
    starting_chips: Option<u64>,
    #[serde(default)]
    initial_bet: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
}

fn apply_file(cfg: &mut SessionConfig, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.decks_in_shoe {
        cfg.table.decks_in_shoe = v;
        sources.decks_in_shoe = ValueSource::File;
    }
    if let Some(v) = f.show_hand_score {
        cfg.table.show_hand_score = v;
        sources.show_hand_score = ValueSource::File;
    }
    if let Some(v) = f.show_shoe_count {
        cfg.table.show_shoe_count = v;
        sources.show_shoe_count = ValueSource::File;
    }
    if let Some(v) = f.dealer_hits_soft_17 {
        cfg.table.dealer_hits_soft_17 = v;
        sources.dealer_hits_soft_17 = ValueSource::File;
    }
    if let Some(v) = f.allow_double_after_split {
        cfg.table.allow_double_after_split = v;
        sources.allow_double_after_split = ValueSource::File;
    }
    if let Some(v) = f.starting_chips {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::File;
    }
    if let Some(v) = f.initial_bet {
        cfg.initial_bet = v;
        sources.initial_bet = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn validate(cfg: &SessionConfig) -> Result<(), ConfigError> {
    if !(MIN_DECKS..=MAX_DECKS).contains(&cfg.table.decks_in_shoe) {
        return Err(ConfigError::Invalid(format!(
            "decks_in_shoe must be between {} and {}",
            MIN_DECKS, MAX_DECKS
        )));
    }
    if cfg.starting_chips == 0 {
        return Err(ConfigError::Invalid("starting_chips must be >0".into()));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
