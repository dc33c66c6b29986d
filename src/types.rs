//! Core types and structures for wordlist-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, WordlistError};
use crate::output::{Destination, Encoding};

/// Why a generation run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every combination was produced
    Exhausted,
    /// `max_words` was reached
    MaxWords,
    /// `max_time` elapsed
    MaxTime,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "exhausted"),
            StopReason::MaxWords => write!(f, "max_words"),
            StopReason::MaxTime => write!(f, "max_time"),
        }
    }
}

/// Count and time limits for one run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationLimits {
    /// Stop after this many words; `None` is unlimited
    pub max_words: Option<u64>,
    /// Stop once this many seconds have elapsed; `None` is unlimited
    pub max_time_seconds: Option<f64>,
}

impl GenerationLimits {
    /// No limits: run to exhaustion
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Validated limits. `max_words = 0` means unlimited.
    pub fn new(max_words: Option<u64>, max_time_seconds: Option<f64>) -> Result<Self> {
        if let Some(seconds) = max_time_seconds {
            Duration::try_from_secs_f64(seconds).map_err(|_| {
                WordlistError::invalid_limit(
                    "max_time",
                    seconds.to_string(),
                    "must be a finite, non-negative number of seconds in range",
                )
            })?;
        }

        Ok(Self {
            max_words: max_words.filter(|&n| n > 0),
            max_time_seconds,
        })
    }

    /// Parse limits from their textual form (command line, environment)
    pub fn parse(max_words: Option<&str>, max_time_seconds: Option<&str>) -> Result<Self> {
        let words = max_words
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    WordlistError::invalid_limit("max_words", raw, e.to_string())
                })
            })
            .transpose()?;

        let seconds = max_time_seconds
            .map(|raw| {
                raw.trim().parse::<f64>().map_err(|e| {
                    WordlistError::invalid_limit("max_time", raw, e.to_string())
                })
            })
            .transpose()?;

        Self::new(words, seconds)
    }

    /// Time limit as a `Duration`; a value outside `Duration`'s range is no limit
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time_seconds
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_words.is_none() && self.max_time_seconds.is_none()
    }
}

/// Configuration for a wordlist run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Written after every word
    pub delimiter: String,
    /// Used for wordlist input files and output destinations
    pub encoding: Encoding,
    pub destination: Destination,
    pub limits: GenerationLimits,
    /// Words between progress callbacks
    pub progress_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            delimiter: "\n".to_string(),
            encoding: Encoding::Utf8,
            destination: Destination::Memory,
            limits: GenerationLimits::unlimited(),
            progress_interval: 10_000,
        }
    }
}

impl RunConfig {
    /// Defaults overlaid with `WORDLIST_*` environment variables
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(delimiter) = var("WORDLIST_DELIMITER") {
            config.delimiter = delimiter;
        }
        if let Some(encoding) = var("WORDLIST_ENCODING") {
            config.encoding = encoding.parse()?;
        }
        if let Some(output) = var("WORDLIST_OUTPUT") {
            config.destination = match output.as_str() {
                "-" | "stdout" => Destination::Stdout,
                path => Destination::File(path.into()),
            };
        }
        config.limits = GenerationLimits::parse(
            var("WORDLIST_MAX_WORDS").as_deref(),
            var("WORDLIST_MAX_TIME").as_deref(),
        )?;

        Ok(config)
    }
}

/// Snapshot passed to progress callbacks
#[derive(Debug, Clone)]
pub struct RunProgress {
    pub emitted: u64,
    pub total: Option<u64>,
    pub words_per_second: f64,
}

impl RunProgress {
    /// Percentage of the full product emitted, when the product is known
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some(self.emitted as f64 / total as f64 * 100.0),
            None => None,
        }
    }
}

/// Outcome summary of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub template: String,
    pub emitted: u64,
    /// Full product size; `None` when it exceeds `u64`
    pub total: Option<u64>,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
}

/// Result of [`crate::WordList::run`]
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Collected words for in-memory destinations
    pub words: Option<Vec<String>>,
    pub summary: RunSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_parse() {
        let limits = GenerationLimits::parse(Some("5"), Some("0.5")).unwrap();
        assert_eq!(limits.max_words, Some(5));
        assert_eq!(limits.max_time(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_zero_words_is_unlimited() {
        let limits = GenerationLimits::parse(Some("0"), None).unwrap();
        assert!(limits.is_unlimited());
    }

    #[test]
    fn test_invalid_limits() {
        for (words, time) in [(Some("-1"), None), (Some("ten"), None), (None, Some("-0.1")), (None, Some("soon")), (None, Some("inf"))] {
            let err = GenerationLimits::parse(words, time).unwrap_err();
            assert!(matches!(err, WordlistError::InvalidLimit { .. }), "{:?}/{:?}", words, time);
        }
    }

    #[test]
    fn test_out_of_range_time_limit() {
        let err = GenerationLimits::parse(None, Some("1e20")).unwrap_err();
        assert!(matches!(err, WordlistError::InvalidLimit { ref limit, .. } if limit == "max_time"));

        let limits = GenerationLimits { max_words: None, max_time_seconds: Some(1e20) };
        assert_eq!(limits.max_time(), None);
        let limits = GenerationLimits { max_words: None, max_time_seconds: Some(-1.0) };
        assert_eq!(limits.max_time(), None);
    }

    #[test]
    fn test_progress_percent() {
        let progress = RunProgress { emitted: 25, total: Some(100), words_per_second: 0.0 };
        assert_eq!(progress.percent(), Some(25.0));
        let progress = RunProgress { emitted: 25, total: None, words_per_second: 0.0 };
        assert_eq!(progress.percent(), None);
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.delimiter, "\n");
        assert_eq!(config.destination, Destination::Memory);
        assert!(config.limits.is_unlimited());
    }
}
