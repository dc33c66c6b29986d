//! Run entry point: parse, expand, write

use std::time::Instant;

use chrono::Utc;

use crate::engine::generate;
use crate::enumerator::Bindings;
use crate::error::Result;
use crate::output::OutputSink;
use crate::pattern::parse;
use crate::types::{RunConfig, RunOutcome, RunProgress, RunSummary, StopReason};

/// Wordlist builder bound to one configuration and binding table
#[derive(Debug, Clone)]
pub struct WordList {
    config: RunConfig,
    bindings: Bindings,
}

impl WordList {
    pub fn new(config: RunConfig, bindings: Bindings) -> Self {
        Self { config, bindings }
    }

    /// Built-in enumerators only
    pub fn with_builtins(config: RunConfig) -> Self {
        Self::new(config, Bindings::new())
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Number of words the template expands to, ignoring limits
    pub fn count(&self, template: &str) -> Result<Option<u64>> {
        Ok(parse(template, &self.bindings)?.total_combinations())
    }

    /// Generate the wordlist for `template` into the configured destination
    pub fn run(&self, template: &str) -> Result<RunOutcome> {
        self.run_with_progress(template, |_| {})
    }

    /// Like [`WordList::run`], calling `on_progress` every
    /// `progress_interval` words and once at the end
    pub fn run_with_progress<F>(&self, template: &str, mut on_progress: F) -> Result<RunOutcome>
    where
        F: FnMut(&RunProgress),
    {
        // Parse before opening the destination so a bad template leaves files alone
        let pattern = parse(template, &self.bindings)?;
        let total = pattern.total_combinations();

        let mut sink = OutputSink::open(&self.config.destination, &self.config.delimiter, self.config.encoding)?;

        tracing::info!(
            template = %template,
            total = ?total,
            destination = %self.config.destination,
            max_words = ?self.config.limits.max_words,
            max_time = ?self.config.limits.max_time_seconds,
            "Starting wordlist generation"
        );

        let started_at = Utc::now();
        let start_time = Instant::now();
        let interval = self.config.progress_interval.max(1);

        let mut words = generate(&pattern, self.config.limits);
        for word in words.by_ref() {
            sink.write_word(&word)?;
            if sink.written() % interval == 0 {
                on_progress(&progress(sink.written(), total, start_time));
            }
        }

        let emitted = words.emitted();
        let stop_reason = words.stop_reason().unwrap_or(StopReason::Exhausted);
        let collected = sink.finish()?;
        on_progress(&progress(emitted, total, start_time));

        let elapsed = start_time.elapsed();
        tracing::info!(
            emitted = %emitted,
            stop_reason = %stop_reason,
            duration_ms = %elapsed.as_millis(),
            "Wordlist generation completed"
        );

        Ok(RunOutcome {
            words: collected,
            summary: RunSummary {
                template: template.to_string(),
                emitted,
                total,
                stop_reason,
                started_at,
                finished_at: Utc::now(),
                elapsed_seconds: elapsed.as_secs_f64(),
            },
        })
    }
}

fn progress(emitted: u64, total: Option<u64>, start_time: Instant) -> RunProgress {
    let elapsed = start_time.elapsed().as_secs_f64();
    RunProgress {
        emitted,
        total,
        words_per_second: if elapsed > 0.0 { emitted as f64 / elapsed } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerator::EnumeratorSource;
    use crate::output::{Destination, Encoding};
    use crate::types::GenerationLimits;

    #[test]
    fn test_run_in_memory() {
        let list = WordList::with_builtins(RunConfig::default());
        let outcome = list.run("abc%(digits)").unwrap();
        let words = outcome.words.unwrap();
        assert_eq!(words.len(), 10);
        assert_eq!(words.first().map(String::as_str), Some("abc0"));
        assert_eq!(words.last().map(String::as_str), Some("abc9"));
        assert_eq!(outcome.summary.stop_reason, StopReason::Exhausted);
        assert_eq!(outcome.summary.total, Some(10));
    }

    #[test]
    fn test_count() {
        let mut bindings = Bindings::new();
        bindings
            .declare_source("abc", &EnumeratorSource::Pattern("[a-c]".to_string()), Encoding::Utf8)
            .unwrap();
        let list = WordList::new(RunConfig::default(), bindings);
        assert_eq!(list.count("abc%(abc){3}").unwrap(), Some(27));
    }

    #[test]
    fn test_progress_callback() {
        let config = RunConfig {
            progress_interval: 4,
            ..Default::default()
        };
        let list = WordList::with_builtins(config);
        let mut seen = Vec::new();
        list.run_with_progress("%(digits)", |p| seen.push(p.emitted)).unwrap();
        assert_eq!(seen, vec![4, 8, 10]);
    }

    #[test]
    fn test_bad_template_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = RunConfig {
            destination: Destination::File(path.clone()),
            ..Default::default()
        };
        let list = WordList::with_builtins(config);
        assert!(list.run("%(nope)").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_max_words_summary() {
        let config = RunConfig {
            limits: GenerationLimits::new(Some(3), None).unwrap(),
            ..Default::default()
        };
        let outcome = WordList::with_builtins(config).run("%(ascii_lowercase)").unwrap();
        assert_eq!(outcome.summary.emitted, 3);
        assert_eq!(outcome.summary.stop_reason, StopReason::MaxWords);
        assert_eq!(outcome.words.unwrap(), vec!["a", "b", "c"]);
    }
}
