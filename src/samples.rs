use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// Built-in reference texts
pub const DEFAULT_SAMPLES: [&str; 4] = [
    "The quick brown fox jumps over the lazy dog.",
    "Practice makes progress. Keep typing to improve your speed and accuracy.",
    "Web development combines creativity with logic - build small projects every day.",
    "Typing fast is great, but typing accurately will get you further in the long run.",
];

/// Fixed pool of reference texts a test picks from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePool {
    texts: Vec<String>,
}

impl SamplePool {
    /// Build a pool from `texts`, dropping blank entries.
    ///
    /// Every run of whitespace (tabs and newlines included) becomes a single
    /// space, since only the space bar types whitespace. An empty pool falls
    /// back to [`DEFAULT_SAMPLES`].
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts
            .into_iter()
            .map(|t| t.into().split_whitespace().join(" "))
            .filter(|t| !t.is_empty())
            .collect();

        if texts.is_empty() {
            Self::default()
        } else {
            Self { texts }
        }
    }

    /// A pool holding a single custom text
    pub fn single(text: impl Into<String>) -> Self {
        Self::new([text.into()])
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.texts
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SAMPLES[0])
    }

    pub fn pick_random(&self) -> &str {
        self.pick(&mut rand::thread_rng())
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl Default for SamplePool {
    fn default() -> Self {
        Self {
            texts: DEFAULT_SAMPLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_pool() {
        let pool = SamplePool::default();
        assert_eq!(pool.len(), DEFAULT_SAMPLES.len());
        assert_eq!(pool.texts, DEFAULT_SAMPLES.to_vec());
    }

    #[test]
    fn test_default_samples_are_ascii() {
        for s in DEFAULT_SAMPLES {
            assert!(s.is_ascii(), "not typeable on a plain keyboard: {s}");
        }
    }

    #[test]
    fn test_blank_entries_dropped() {
        let pool = SamplePool::new(["one", "  ", "", "\t\n", "two"]);
        assert_eq!(pool.texts, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_whitespace_runs_collapse_to_spaces() {
        let pool = SamplePool::single("  a\tb\nc   d \r\n");
        assert_eq!(pool.texts, vec!["a b c d".to_string()]);
    }

    #[test]
    fn test_default_samples_unchanged_by_normalising() {
        let pool = SamplePool::new(DEFAULT_SAMPLES);
        assert_eq!(pool, SamplePool::default());
    }

    #[test]
    fn test_empty_pool_falls_back_to_defaults() {
        let pool = SamplePool::new(Vec::<String>::new());
        assert_eq!(pool, SamplePool::default());
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_single_pool_always_picks_it() {
        let pool = SamplePool::single("custom text");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(pool.pick(&mut rng), "custom text");
        }
    }

    #[test]
    fn test_pick_stays_within_pool() {
        let pool = SamplePool::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let picked = pool.pick(&mut rng);
            assert!(DEFAULT_SAMPLES.iter().any(|s| *s == picked));
        }
    }
}
