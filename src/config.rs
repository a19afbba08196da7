//! Resize options from defaults, a config file and the environment, in that order.
#[cfg(feature = "config")]
use ::std::path::{Path, PathBuf};

use ::serde::Deserialize;

use super::*;

/// Environment variable overriding [`Config::filter`]
pub const ENV_FILTER: &str = "RESCALE_FILTER";
/// Environment variable overriding [`Config::threads`], `0` means the global rayon pool
pub const ENV_THREADS: &str = "RESCALE_THREADS";

/// The rescale configuration struct that is deserialized from the config file and environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// The filter to resample with
    pub filter: FilterType,
    /// Worker threads of a dedicated pool, `None` runs on the global rayon pool
    pub threads: Option<usize>,
}

impl Config {
    /// Defaults, then the config file at [`config_path`] if there is one, then the environment.
    /// # Errors
    /// If the config file exists but cannot be read or parsed, or an environment override is invalid
    pub fn load() -> Result<Self> {
        #[cfg(feature = "config")]
        let mut config = match config_path() {
            Some(p) if p.is_file() => Self::from_file(&p)?,
            _ => {
                debug!("no config file found, using default config");
                Self::default()
            }
        };
        #[cfg(not(feature = "config"))]
        let mut config = Self::default();
        config.merge_env()?;
        Ok(config)
    }
    /// Parse a TOML config file
    #[cfg(feature = "config")]
    pub fn from_file(path: &Path) -> Result<Self> {
        let s = ::std::fs::read_to_string(path).with_context(|| format!("could not read config file: {}", path.display()))?;
        let config = ::toml::from_str::<Config>(&s).with_context(|| format!("could not parse config file: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "config parsed");
        Ok(config)
    }
    /// Override with [`ENV_FILTER`] and [`ENV_THREADS`] where set
    pub fn merge_env(&mut self) -> Result<()> { self.merge_vars(|key| ::std::env::var(key).ok()) }
    /// Override with variables looked up by `var`
    pub fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(f) = var(ENV_FILTER) {
            self.filter = f.parse::<FilterType>().map_err(|e| anyhow!(e)).with_context(|| format!("invalid {}", ENV_FILTER))?;
        }
        if let Some(t) = var(ENV_THREADS) {
            let t = t.trim().parse::<usize>().with_context(|| format!("invalid {}: {:?}", ENV_THREADS, t))?;
            self.threads = if t == 0 { None } else { Some(t) };
        }
        Ok(())
    }
}

/// `config.toml` in the platform config directory for rescale, if the platform has one.
#[cfg(feature = "config")]
pub fn config_path() -> Option<PathBuf> {
    ::directories::ProjectDirs::from("", "", "rescale").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.filter, FilterType::Lanczos);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn env_overrides() {
        let mut config = Config::default();
        config.merge_vars(vars(&[(ENV_FILTER, "Catmull-Rom"), (ENV_THREADS, " 3 ")])).unwrap();
        assert_eq!(config, Config { filter: FilterType::Catmull, threads: Some(3) });
        config.merge_vars(vars(&[(ENV_THREADS, "0")])).unwrap();
        assert_eq!(config.threads, None);
        assert_eq!(config.filter, FilterType::Catmull);
    }

    #[test]
    fn env_rejects_garbage() {
        let mut config = Config::default();
        assert!(config.merge_vars(vars(&[(ENV_FILTER, "gaussian")])).is_err());
        assert!(config.merge_vars(vars(&[(ENV_THREADS, "many")])).is_err());
        assert_eq!(config, Config::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn file_parsing() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        ::std::fs::write(&path, "filter = \"mitchell\"\nthreads = 2\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config { filter: FilterType::Mitchell, threads: Some(2) });
        ::std::fs::write(&path, "threads = 5\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config { filter: FilterType::Lanczos, threads: Some(5) });
        ::std::fs::write(&path, "filter = \"sharp\"\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("could not parse config file"));
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
