use std::{env, error::Error, fmt, num::NonZeroUsize, path::PathBuf, str::FromStr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_DIR: &str = "modelos";

/// Runtime configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding one serialized file per trained model.
    pub model_dir: PathBuf,
    /// Maximum amount of models kept in memory, `None` keeps every loaded model.
    pub cache_capacity: Option<NonZeroUsize>,
    /// Fixes the training shuffling so the same examples always produce the same model.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            cache_capacity: None,
            seed: None,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Recognized variables: `HOST`, `PORT`, `MODEL_DIR`, `MODEL_CACHE_CAPACITY` and
    /// `TRAINING_SEED`. Unset variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            model_dir: lookup("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            cache_capacity: parse_var(&lookup, "MODEL_CACHE_CAPACITY")?,
            seed: parse_var(&lookup, "TRAINING_SEED")?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigErr>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigErr::Invalid { key, value })
}

/// Invalid configuration values.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigErr {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Invalid { key, value } => write!(f, "invalid value for {key}: {value:?}"),
        }
    }
}

impl Error for ConfigErr {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_dir, PathBuf::from("modelos"));
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("MODEL_DIR", "/var/lib/textlabx"),
            ("MODEL_CACHE_CAPACITY", "16"),
            ("TRAINING_SEED", " 42 "),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_dir, PathBuf::from("/var/lib/textlabx"));
        assert_eq!(config.cache_capacity, NonZeroUsize::new(16));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigErr::Invalid {
                key: "PORT",
                value: "http".into()
            }
        );

        let err = Config::from_lookup(lookup(&[("MODEL_CACHE_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigErr::Invalid {
                key: "MODEL_CACHE_CAPACITY",
                ..
            }
        ));
    }
}
