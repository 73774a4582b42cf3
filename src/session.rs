use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::metrics::Metrics;
use crate::scorer::{score, Progress, Score};

/// Lifecycle of a single typing test
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// One typing test: the reference text, the countdown and everything
/// derived from the typed input.
///
/// Ticks are ignored outside [`Phase::Running`], so a reset always cancels
/// the countdown before any counter is cleared.
#[derive(Debug, Clone)]
pub struct Session {
    reference: String,
    duration: Duration,
    phase: Phase,
    started_at: Option<Instant>,
    seconds_remaining: f64,
    typed: String,
    progress: Progress,
    score: Score,
    metrics: Metrics,
    summary: Option<Metrics>,
}

impl Session {
    pub fn new(reference: impl Into<String>, duration: Duration) -> Self {
        let reference = reference.into();
        let score = score("", &reference);
        Self {
            reference,
            duration,
            phase: Phase::Idle,
            started_at: None,
            seconds_remaining: duration.as_secs_f64(),
            typed: String::new(),
            progress: Progress::new(),
            score,
            metrics: Metrics::default(),
            summary: None,
        }
    }

    /// Begin the countdown. Only an idle session can be started.
    pub fn start_at(&mut self, now: Instant) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Running;
        self.started_at = Some(now);
        self.seconds_remaining = self.duration.as_secs_f64();
        debug!(duration_secs = self.duration.as_secs(), "session started");
    }

    pub fn on_tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Advance the countdown from the wall clock.
    ///
    /// Returns true when the display needs refreshing.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let started_at = match (self.phase, self.started_at) {
            (Phase::Running, Some(started_at)) => started_at,
            _ => return false,
        };

        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        let remaining = self.duration.as_secs_f64() - elapsed;
        self.seconds_remaining = ((remaining * 10.0).round() / 10.0).max(0.0);
        self.refresh_metrics();

        if self.seconds_remaining <= 0.0 {
            self.finish();
        }
        true
    }

    /// Stop the countdown, freeze the summary and disable input.
    pub fn finish(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Finished;

        let summary = Metrics::summary(
            self.score.correct_chars,
            self.progress.typed_chars(),
            self.score.errors,
            self.duration.as_secs_f64(),
            self.seconds_remaining,
        );
        self.metrics = summary;
        self.summary = Some(summary);

        info!(
            wpm = summary.wpm,
            cpm = summary.cpm,
            accuracy = summary.accuracy,
            errors = summary.errors,
            typed_chars = self.progress.typed_chars(),
            "session finished"
        );
    }

    /// Return to idle with a new reference text and fresh counters.
    pub fn reset(&mut self, reference: impl Into<String>, duration: Duration) {
        let previous = self.phase;
        *self = Self::new(reference, duration);
        debug!(from = %previous, duration_secs = duration.as_secs(), "session reset");
    }

    /// Change the test length. Only applies while idle.
    pub fn select_duration(&mut self, duration: Duration) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.duration = duration;
        self.seconds_remaining = duration.as_secs_f64();
        debug!(duration_secs = duration.as_secs(), "duration selected");
        true
    }

    pub fn on_input(&mut self, typed: &str) -> bool {
        self.input_at(typed, Instant::now())
    }

    /// Rescore after the typed text changed.
    ///
    /// The first non-empty input starts the countdown. Input is ignored once
    /// the session has finished. Returns whether the input was accepted.
    pub fn input_at(&mut self, typed: &str, now: Instant) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        if self.phase == Phase::Idle && !typed.is_empty() {
            self.start_at(now);
        }

        self.progress.observe(typed);
        self.typed.clear();
        self.typed.push_str(typed);
        self.score = score(&self.typed, &self.reference);
        self.refresh_metrics();
        true
    }

    pub fn push_char_at(&mut self, c: char, now: Instant) -> bool {
        let mut next = self.typed.clone();
        next.push(c);
        self.input_at(&next, now)
    }

    pub fn backspace_at(&mut self, now: Instant) -> bool {
        if self.typed.is_empty() {
            return false;
        }
        let mut next = self.typed.clone();
        next.pop();
        self.input_at(&next, now)
    }

    fn refresh_metrics(&mut self) {
        self.metrics = Metrics::live(
            self.score.correct_chars,
            self.progress.typed_chars(),
            self.score.errors,
            self.elapsed_secs(),
        );
    }

    /// Seconds used so far, as seen by the last tick
    pub fn elapsed_secs(&self) -> f64 {
        (self.duration.as_secs_f64() - self.seconds_remaining).max(0.0)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_input_enabled(&self) -> bool {
        self.phase != Phase::Finished
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn seconds_remaining(&self) -> f64 {
        self.seconds_remaining
    }

    pub fn typed_chars(&self) -> usize {
        self.progress.typed_chars()
    }

    pub fn correct_chars(&self) -> usize {
        self.score.correct_chars
    }

    pub fn errors(&self) -> usize {
        self.score.errors
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Live metrics, or the frozen summary once finished
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn summary(&self) -> Option<Metrics> {
        self.summary
    }
}
