//! Runtime configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use algoviz_algorithms::Algorithm;

use crate::error::{Result, VisError};
use crate::playback::Speed;

/// Length of the random bar array.
pub const DEFAULT_ARRAY_LEN: usize = 50;

/// Configuration for a visualizer session and its server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    pub speed: Speed,
    pub array_len: usize,
    /// Algorithm selected on startup
    pub algorithm: Algorithm,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            seed: None,
            speed: Speed::default(),
            array_len: DEFAULT_ARRAY_LEN,
            algorithm: Algorithm::Bubble,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Reads `ALGOVIZ_ADDR`, `ALGOVIZ_SEED`, `ALGOVIZ_SPEED`,
    /// `ALGOVIZ_ARRAY_LEN` and `ALGOVIZ_ALGORITHM`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "ALGOVIZ_ADDR")?.unwrap_or(defaults.addr);
        let seed = parse_var(&lookup, "ALGOVIZ_SEED")?;
        let speed = parse_var::<u8>(&lookup, "ALGOVIZ_SPEED")?
            .map(Speed::new)
            .unwrap_or(defaults.speed);
        let array_len = parse_var(&lookup, "ALGOVIZ_ARRAY_LEN")?.unwrap_or(defaults.array_len);
        let algorithm =
            parse_var(&lookup, "ALGOVIZ_ALGORITHM")?.unwrap_or(defaults.algorithm);

        Ok(Self {
            addr,
            seed,
            speed,
            array_len,
            algorithm,
        })
    }

    /// Override the listen port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| VisError::Config { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.addr.port(), 3000);
    }

    #[test]
    fn reads_every_variable() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ALGOVIZ_ADDR", "127.0.0.1:8080"),
            ("ALGOVIZ_SEED", "42"),
            ("ALGOVIZ_SPEED", "90"),
            ("ALGOVIZ_ARRAY_LEN", "20"),
            ("ALGOVIZ_ALGORITHM", "greedy-bfs"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.speed.get(), 90);
        assert_eq!(config.array_len, 20);
        assert_eq!(config.algorithm, Algorithm::GreedyBfs);
    }

    #[test]
    fn rejects_bad_values() {
        let err = VisConfig::from_lookup(lookup(&[("ALGOVIZ_SEED", "soon")])).unwrap_err();
        assert!(matches!(err, VisError::Config { var: "ALGOVIZ_SEED", .. }));
    }

    #[test]
    fn port_override_keeps_host() {
        let config = VisConfig::default().with_port(4000);
        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 4000)));
    }
}
