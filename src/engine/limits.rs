//! Count and time limits around a word generator

use std::time::{Duration, Instant};

use super::WordGenerator;
use crate::types::{GenerationLimits, StopReason};

/// Limited, lazy word sequence returned by [`super::generate`].
///
/// Limits are checked after each emitted word, so a word is never cut
/// short and nothing is emitted once a limit has triggered.
#[derive(Debug, Clone)]
pub struct Words<'p> {
    generator: WordGenerator<'p>,
    max_words: Option<u64>,
    max_time: Option<Duration>,
    started: Instant,
    emitted: u64,
    stop_reason: Option<StopReason>,
}

impl<'p> Words<'p> {
    /// Wrap a generator; the clock starts now
    pub fn new(generator: WordGenerator<'p>, limits: GenerationLimits) -> Self {
        let stop_reason = generator.is_exhausted().then_some(StopReason::Exhausted);
        Self {
            generator,
            max_words: limits.max_words,
            max_time: limits.max_time(),
            started: Instant::now(),
            emitted: 0,
            stop_reason,
        }
    }

    /// Words emitted so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Set once the sequence has ended
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Underlying odometer, for progress reporting
    pub fn generator(&self) -> &WordGenerator<'p> {
        &self.generator
    }

    fn check_limits(&self) -> Option<StopReason> {
        if self.generator.is_exhausted() {
            return Some(StopReason::Exhausted);
        }
        if self.max_words.is_some_and(|max| self.emitted >= max) {
            return Some(StopReason::MaxWords);
        }
        if self.max_time.is_some_and(|max| self.started.elapsed() >= max) {
            return Some(StopReason::MaxTime);
        }
        None
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop_reason.is_some() {
            return None;
        }
        let Some(word) = self.generator.next() else {
            self.stop_reason = Some(StopReason::Exhausted);
            return None;
        };
        self.emitted += 1;
        self.stop_reason = self.check_limits();
        Some(word)
    }
}
