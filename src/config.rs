//! Engine settings, stored as postcard files.

use std::fs;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, BoardError, DEFAULT_SIZE};
use crate::expectimax::{Difficulty, DEFAULT_CACHE_CAPACITY};
use crate::history;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub history_capacity: usize,
    pub cache_capacity: usize,
    pub difficulty: Difficulty,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_SIZE,
            history_capacity: history::DEFAULT_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] BoardError),
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), BoardError> {
        Board::new(self.grid_size).map(|_| ())
    }

    /// RNG for this config, offset by `stream` so several boards can share one seed.
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> { Ok(postcard::to_allocvec(self)?) }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = postcard::from_bytes(bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> { Self::from_bytes(&fs::read(path)?) }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.grid_size, 4);
        assert_eq!(cfg.history_capacity, 10);
        assert_eq!(cfg.cache_capacity, 2000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn file_round_trip() {
        let cfg = EngineConfig { grid_size: 6, difficulty: Difficulty::Hard, seed: Some(9), ..Default::default() };
        let tmp = NamedTempFile::new().unwrap();
        cfg.save(tmp.path()).unwrap();
        assert_eq!(EngineConfig::load(tmp.path()).unwrap(), cfg);
    }

    #[test]
    fn rejects_bad_size() {
        let cfg = EngineConfig { grid_size: 40, ..Default::default() };
        let bytes = cfg.to_bytes().unwrap();
        assert!(matches!(EngineConfig::from_bytes(&bytes), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn seeded_streams_differ() {
        let cfg = EngineConfig { seed: Some(1), ..Default::default() };
        let a: u64 = cfg.rng(0).gen();
        let b: u64 = cfg.rng(1).gen();
        assert_ne!(a, b);
        assert_eq!(a, cfg.rng(0).gen::<u64>());
    }
}
