/// Standard word length used for WPM
pub const CHARS_PER_WORD: f64 = 5.0;

/// The four displayed metrics, rounded for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub cpm: u32,
    pub accuracy: u32,
    pub errors: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            cpm: 0,
            accuracy: 100,
            errors: 0,
        }
    }
}

impl Metrics {
    /// Metrics while the test is running.
    ///
    /// The elapsed time is floored at one second so the first keystroke does
    /// not produce an absurd rate.
    pub fn live(
        correct_chars: usize,
        typed_chars: usize,
        errors: usize,
        elapsed_secs: f64,
    ) -> Self {
        let minutes = (elapsed_secs.max(0.0) / 60.0).max(1.0 / 60.0);
        Self::over(correct_chars, typed_chars, errors, minutes)
    }

    /// Metrics for the summary panel.
    ///
    /// Falls back to the full duration when no time has elapsed.
    pub fn summary(
        correct_chars: usize,
        typed_chars: usize,
        errors: usize,
        duration_secs: f64,
        remaining_secs: f64,
    ) -> Self {
        let elapsed = duration_secs - remaining_secs;
        let minutes = if elapsed > 0.0 {
            elapsed / 60.0
        } else {
            duration_secs / 60.0
        };
        Self::over(correct_chars, typed_chars, errors, minutes)
    }

    fn over(correct_chars: usize, typed_chars: usize, errors: usize, minutes: f64) -> Self {
        let correct = correct_chars as f64;
        Self {
            wpm: rate(correct / CHARS_PER_WORD, minutes),
            cpm: rate(correct, minutes),
            accuracy: accuracy(correct_chars, typed_chars),
            errors,
        }
    }
}

/// Accuracy percentage, 100 when nothing has been typed yet
pub fn accuracy(correct_chars: usize, typed_chars: usize) -> u32 {
    if typed_chars == 0 {
        return 100;
    }
    let pct = (correct_chars as f64 / typed_chars as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as u32
}

/// `count / minutes`, rounded; non-finite results collapse to zero
pub fn rate(count: f64, minutes: f64) -> u32 {
    let r = count / minutes;
    if r.is_finite() {
        r.round().max(0.0) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let m = Metrics::default();
        assert_eq!(m.wpm, 0);
        assert_eq!(m.cpm, 0);
        assert_eq!(m.accuracy, 100);
        assert_eq!(m.errors, 0);
    }

    #[test]
    fn test_accuracy_no_input() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(1, 8), 13);
        assert_eq!(accuracy(0, 5), 0);
    }

    #[test]
    fn test_rate_handles_zero_minutes() {
        assert_eq!(rate(10.0, 0.0), 0);
        assert_eq!(rate(0.0, 0.0), 0);
    }

    #[test]
    fn test_live_one_minute() {
        let m = Metrics::live(250, 260, 10, 60.0);
        assert_eq!(m.wpm, 50);
        assert_eq!(m.cpm, 250);
        assert_eq!(m.accuracy, 96);
        assert_eq!(m.errors, 10);
    }

    #[test]
    fn test_live_floors_elapsed_at_one_second() {
        // 3 chars in "zero" seconds is treated as 3 chars in one second
        let m = Metrics::live(3, 3, 0, 0.0);
        assert_eq!(m.cpm, 180);
        assert_eq!(m.wpm, 36);
    }

    #[test]
    fn test_summary_uses_elapsed_time() {
        // 30 of 60 seconds used
        let m = Metrics::summary(100, 100, 0, 60.0, 30.0);
        assert_eq!(m.cpm, 200);
        assert_eq!(m.wpm, 40);
    }

    #[test]
    fn test_summary_falls_back_to_duration() {
        let m = Metrics::summary(60, 60, 0, 60.0, 60.0);
        assert_eq!(m.cpm, 60);
        assert_eq!(m.wpm, 12);
    }

    #[test]
    fn test_summary_zero_duration_is_zero() {
        let m = Metrics::summary(60, 60, 0, 0.0, 0.0);
        assert_eq!(m.cpm, 0);
        assert_eq!(m.wpm, 0);
        assert_eq!(m.accuracy, 100);
    }
}
