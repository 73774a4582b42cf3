use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Selectable test lengths
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(try_from = "u64", into = "u64")]
pub enum TestDuration {
    #[value(name = "30")]
    #[strum(serialize = "30s")]
    Thirty,
    #[default]
    #[value(name = "60")]
    #[strum(serialize = "60s")]
    Sixty,
    #[value(name = "120")]
    #[strum(serialize = "120s")]
    OneTwenty,
}

impl TestDuration {
    pub const ALL: [TestDuration; 3] = [
        TestDuration::Thirty,
        TestDuration::Sixty,
        TestDuration::OneTwenty,
    ];

    pub fn secs(self) -> u64 {
        match self {
            TestDuration::Thirty => 30,
            TestDuration::Sixty => 60,
            TestDuration::OneTwenty => 120,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.secs())
    }

    /// Next option in the selector, wrapping around
    pub fn next(self) -> Self {
        match self {
            TestDuration::Thirty => TestDuration::Sixty,
            TestDuration::Sixty => TestDuration::OneTwenty,
            TestDuration::OneTwenty => TestDuration::Thirty,
        }
    }
}

impl TryFrom<u64> for TestDuration {
    type Error = Error;

    fn try_from(secs: u64) -> Result<Self> {
        TestDuration::ALL
            .into_iter()
            .find(|d| d.secs() == secs)
            .ok_or(Error::InvalidDuration(secs))
    }
}

impl From<TestDuration> for u64 {
    fn from(d: TestDuration) -> Self {
        d.secs()
    }
}

/// Optional settings read once at startup. Nothing is written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration: TestDuration,
    pub samples: Vec<String>,
    pub log_file: Option<PathBuf>,
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typeclock") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typeclock_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file yields the defaults; a malformed one is an error.
    fn load(&self) -> Result<Config> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice::<Config>(&bytes).map_err(|source| Error::Config {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "duration": 120, "samples": ["one two", "three"], "log_file": "/tmp/t.log" }"#,
        )
        .unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.duration, TestDuration::OneTwenty);
        assert_eq!(cfg.samples, vec!["one two".to_string(), "three".to_string()]);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/t.log")));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "duration": 30 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.duration, TestDuration::Thirty);
        assert!(cfg.samples.is_empty());
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileConfigStore::with_path(&path).load().unwrap_err();
        assert_matches!(err, Error::Config { .. });
    }

    #[test]
    fn unreadable_config_names_the_path() {
        let dir = tempdir().unwrap();

        let err = FileConfigStore::with_path(dir.path()).load().unwrap_err();
        assert_matches!(err, Error::ConfigRead { ref path, .. } if path == dir.path());
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn unsupported_duration_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "duration": 45 }"#).unwrap();

        let err = FileConfigStore::with_path(&path).load().unwrap_err();
        assert!(err.to_string().contains("45"));
    }

    #[test]
    fn duration_roundtrips_as_integer() {
        let json = serde_json::to_string(&TestDuration::Sixty).unwrap();
        assert_eq!(json, "60");
        assert_eq!(TestDuration::try_from(30).unwrap(), TestDuration::Thirty);
        assert_matches!(TestDuration::try_from(0), Err(Error::InvalidDuration(0)));
    }

    #[test]
    fn duration_selector_cycles() {
        assert_eq!(TestDuration::Thirty.next(), TestDuration::Sixty);
        assert_eq!(TestDuration::Sixty.next(), TestDuration::OneTwenty);
        assert_eq!(TestDuration::OneTwenty.next(), TestDuration::Thirty);
    }

    #[test]
    fn duration_display_and_secs() {
        assert_eq!(TestDuration::default(), TestDuration::Sixty);
        assert_eq!(TestDuration::Thirty.to_string(), "30s");
        assert_eq!(TestDuration::OneTwenty.secs(), 120);
        assert_eq!(
            TestDuration::Sixty.as_duration(),
            Duration::from_secs(60)
        );
    }
}
