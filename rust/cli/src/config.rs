use pokeher_engine::policy::{
    BlindSchedule, Blinds, FixedBlinds, IllegalActionPolicy, LevelSchedule, LimitKind,
};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Hands per blind level; 0 keeps the blinds fixed
    pub hands_per_level: u64,
    pub seed: Option<u64>,
    pub limit: LimitKind,
    pub on_illegal: IllegalActionPolicy,
}

impl Config {
    pub fn blind_schedule(&self) -> Box<dyn BlindSchedule> {
        if self.hands_per_level == 0 {
            Box::new(FixedBlinds(Blinds::new(self.small_blind, self.big_blind)))
        } else {
            Box::new(LevelSchedule {
                hands_per_level: self.hands_per_level,
            })
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
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub hands_per_level: ValueSource,
    pub seed: ValueSource,
    pub limit: ValueSource,
    pub on_illegal: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            hands_per_level: ValueSource::Default,
            seed: ValueSource::Default,
            limit: ValueSource::Default,
            on_illegal: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 1_000,
            small_blind: 10,
            big_blind: 20,
            hands_per_level: 0,
            seed: None,
            limit: LimitKind::NoLimit,
            on_illegal: IllegalActionPolicy::Reject,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("POKEHER_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.hands_per_level {
            cfg.hands_per_level = v;
            sources.hands_per_level = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.limit {
            cfg.limit = v;
            sources.limit = ValueSource::File;
        }
        if let Some(v) = f.on_illegal {
            cfg.on_illegal = v;
            sources.on_illegal = ValueSource::File;
        }
    }

    if let Some(v) = env_value("POKEHER_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_HANDS_PER_LEVEL")? {
        cfg.hands_per_level = v;
        sources.hands_per_level = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_LIMIT")? {
        cfg.limit = v;
        sources.limit = ValueSource::Env;
    }
    if let Some(v) = env_value("POKEHER_ON_ILLEGAL")? {
        cfg.on_illegal = v;
        sources.on_illegal = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Parses a non-empty environment variable.
fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", name, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    hands_per_level: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    limit: Option<LimitKind>,
    #[serde(default)]
    on_illegal: Option<IllegalActionPolicy>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.small_blind == 0 || cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must be >0".into(),
        ));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >= small_blind".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_inverted_blinds() {
        let cfg = Config {
            small_blind: 50,
            big_blind: 20,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("big_blind"));
    }

    #[test]
    fn fixed_blinds_unless_levels_are_set() {
        let fixed = Config::default().blind_schedule();
        assert_eq!(fixed.blinds_for_hand(500), Blinds::new(10, 20));
        let levels = Config {
            hands_per_level: 10,
            ..Config::default()
        }
        .blind_schedule();
        assert_eq!(levels.blinds_for_hand(10), Blinds::new(15, 30));
    }

    #[test]
    fn file_config_parses_policies() {
        let f: FileConfig =
            toml::from_str("limit = \"pot-limit\"\non_illegal = \"fold\"\n").unwrap();
        assert_eq!(f.limit, Some(LimitKind::PotLimit));
        assert_eq!(f.on_illegal, Some(IllegalActionPolicy::Fold));
    }
}
