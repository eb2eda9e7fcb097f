use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

/// What to do when a name is defined more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Abort the link.
    #[default]
    Error,
    /// Keep the first definition and warn.
    First,
    /// Keep the last definition and warn.
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub duplicates: DuplicatePolicy,
    pub warnings: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            duplicates: DuplicatePolicy::Error,
            warnings: true,
        }
    }
}

impl LinkConfig {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_string(), e))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("<inline>"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LinkConfig::default();
        assert_eq!(cfg.duplicates, DuplicatePolicy::Error);
        assert!(cfg.warnings);
    }

    #[test]
    fn partial_yaml() {
        let cfg = LinkConfig::from_yaml("duplicates: last\n").unwrap();
        assert_eq!(cfg.duplicates, DuplicatePolicy::Last);
        assert!(cfg.warnings);

        let cfg = LinkConfig::from_yaml("warnings: false").unwrap();
        assert_eq!(cfg.duplicates, DuplicatePolicy::Error);
        assert!(!cfg.warnings);
    }

    #[test]
    fn rejects_unknown() {
        assert!(matches!(
            LinkConfig::from_yaml("duplicates: newest"),
            Err(Error::Config(..))
        ));
        assert!(matches!(
            LinkConfig::from_yaml("colour: true"),
            Err(Error::Config(..))
        ));
    }
}
