//! How many recommendations a caller may ask for.
//!
//! Counts come in steps of 5, start at 5, and never exceed the number of
//! candidates left once the reference track is excluded.

/// Increment between offered recommendation counts.
pub const STEP: usize = 5;

/// The recommendation counts offered for one filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOptions {
    options: Vec<usize>,
    candidates: usize,
}

impl CountOptions {
    /// Offer multiples of [`STEP`] up to `min(max, filtered_len - 1)`.
    #[must_use]
    pub fn new(filtered_len: usize, max: usize) -> Self {
        let candidates = filtered_len.saturating_sub(1);
        let upper = candidates.min(max);
        Self {
            options: (STEP..=upper).step_by(STEP).collect(),
            candidates,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[usize] {
        &self.options
    }

    /// Number of tracks that can be recommended at all.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// The first offered count, or every candidate when fewer than
    /// [`STEP`] remain.
    #[must_use]
    pub fn default_count(&self) -> usize {
        self.options.first().copied().unwrap_or(self.candidates)
    }

    /// Snap a requested count onto an offered one: the largest option not
    /// above the request, or the smallest option for requests below it.
    #[must_use]
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        let Some(requested) = requested else {
            return self.default_count();
        };
        if self.options.is_empty() {
            return self.candidates;
        }

        self.options
            .iter()
            .rev()
            .find(|&&option| option <= requested)
            .copied()
            .unwrap_or_else(|| self.default_count())
    }

    /// The option after `current`, wrapping to the first.
    #[must_use]
    pub fn next(&self, current: usize) -> usize {
        match self.options.iter().position(|&o| o > current) {
            Some(i) => self.options[i],
            None => self.default_count(),
        }
    }

    /// The option before `current`, wrapping to the last.
    #[must_use]
    pub fn previous(&self, current: usize) -> usize {
        self.options
            .iter()
            .rev()
            .find(|&&o| o < current)
            .or_else(|| self.options.last())
            .copied()
            .unwrap_or(self.candidates)
    }
}
