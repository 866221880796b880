//! A guard against structurally broken files.
//!
//! A long run of rows whose assembly cannot be recognized usually means the
//! wrong file (or a wrong column layout) was picked up, not that each row is
//! individually damaged.

use crate::assembly::Assembly;

/// Counts consecutive unrecognized rows within a single file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircuitBreaker {
    /// The number of consecutive unrecognized rows that trips the breaker.
    threshold: usize,

    /// The current run of unrecognized rows.
    consecutive: usize,
}

impl CircuitBreaker {
    /// Creates a new [`CircuitBreaker`]. A threshold of zero is treated as
    /// one.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive: 0,
        }
    }

    /// Records the classification of a row and reports whether the breaker
    /// has tripped.
    ///
    /// Any recognized row ends the current run.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::assembly::Assembly;
    /// use omiclift::breaker::CircuitBreaker;
    ///
    /// let mut breaker = CircuitBreaker::new(2);
    ///
    /// assert!(!breaker.observe(Assembly::Unrecognized));
    /// assert!(!breaker.observe(Assembly::Target));
    /// assert!(!breaker.observe(Assembly::Unrecognized));
    /// assert!(breaker.observe(Assembly::Unrecognized));
    /// ```
    pub fn observe(&mut self, assembly: Assembly) -> bool {
        match assembly {
            Assembly::Unrecognized => self.consecutive += 1,
            Assembly::Legacy | Assembly::Target => self.consecutive = 0,
        }

        self.is_tripped()
    }

    /// Whether the current run has reached the threshold.
    pub fn is_tripped(&self) -> bool {
        self.consecutive >= self.threshold
    }

    /// Clears the current run.
    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Gets the threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trips_on_the_twenty_fifth_row() {
        let mut breaker = CircuitBreaker::new(25);

        for _ in 0..24 {
            assert!(!breaker.observe(Assembly::Unrecognized));
        }

        assert!(breaker.observe(Assembly::Unrecognized));
    }

    #[test]
    fn test_recognized_row_starts_a_fresh_run() {
        let mut breaker = CircuitBreaker::new(25);

        for _ in 0..24 {
            breaker.observe(Assembly::Unrecognized);
        }

        assert!(!breaker.observe(Assembly::Legacy));

        for _ in 0..24 {
            assert!(!breaker.observe(Assembly::Unrecognized));
        }

        assert!(breaker.observe(Assembly::Unrecognized));
    }

    #[test]
    fn test_reset() {
        let mut breaker = CircuitBreaker::new(3);

        breaker.observe(Assembly::Unrecognized);
        breaker.observe(Assembly::Unrecognized);
        breaker.reset();

        assert!(!breaker.observe(Assembly::Unrecognized));
        assert!(!breaker.observe(Assembly::Unrecognized));
        assert!(breaker.observe(Assembly::Unrecognized));
    }
}
