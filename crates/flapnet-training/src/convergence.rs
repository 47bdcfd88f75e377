use flapnet_network::{Fingerprint, math};

/// Decimal places the best score is rounded to before it is compared.
pub const SCORE_PRECISION: i32 = 4;

/// Adapts the mutation rate to how long training has been stuck.
///
/// Two streaks are tracked across generations: how many generations in a row
/// produced the same best fingerprint, and how many produced the same best
/// score. The mutation rate grows with the square of each streak, so a stalled
/// run explores more aggressively until something new takes the lead.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    base_coefficient: f64,
    score_coefficient: f64,
    best_gene: Option<Fingerprint>,
    best_score: Option<f64>,
    gene_streak: u32,
    score_streak: u32,
}

impl ConvergenceTracker {
    #[must_use]
    pub fn new(base_coefficient: f64, score_coefficient: f64) -> Self {
        Self {
            base_coefficient,
            score_coefficient,
            best_gene: None,
            best_score: None,
            gene_streak: 1,
            score_streak: 1,
        }
    }

    #[must_use]
    pub fn gene_streak(&self) -> u32 {
        self.gene_streak
    }

    #[must_use]
    pub fn score_streak(&self) -> u32 {
        self.score_streak
    }

    /// Returns `base * gene_streak² + score * score_streak²`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flapnet_training::convergence::ConvergenceTracker;
    ///
    /// let tracker = ConvergenceTracker::new(2.0, 1.0);
    /// assert_eq!(tracker.mutation_rate(), 3.0);
    /// ```
    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        let gene = f64::from(self.gene_streak);
        let score = f64::from(self.score_streak);
        self.base_coefficient * gene * gene + self.score_coefficient * score * score
    }

    /// Records the best individual of a generation.
    ///
    /// A streak grows when its value matches the previous generation's and
    /// resets to 1 otherwise. Scores are compared after rounding to
    /// [`SCORE_PRECISION`] decimal places.
    pub fn observe(&mut self, gene: &Fingerprint, score: f64) {
        if self.best_gene.as_ref() == Some(gene) {
            self.gene_streak += 1;
        } else {
            self.gene_streak = 1;
            self.best_gene = Some(gene.clone());
        }

        let score = math::round_to_decimal(score, SCORE_PRECISION);
        if self.best_score.is_some_and(|best| best.to_bits() == score.to_bits()) {
            self.score_streak += 1;
        } else {
            self.score_streak = 1;
            self.best_score = Some(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(s: &str) -> Fingerprint {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_observation_starts_streaks() {
        let mut tracker = ConvergenceTracker::new(2.0, 1.0);
        tracker.observe(&gene("0101"), 3.5);
        assert_eq!(tracker.gene_streak(), 1);
        assert_eq!(tracker.score_streak(), 1);
        assert_eq!(tracker.mutation_rate(), 3.0);
    }

    #[test]
    fn test_stalled_run_raises_rate() {
        let mut tracker = ConvergenceTracker::new(2.0, 1.0);
        for _ in 0..3 {
            tracker.observe(&gene("0101"), 3.5);
        }
        assert_eq!(tracker.gene_streak(), 3);
        assert_eq!(tracker.score_streak(), 3);
        // 2 * 9 + 1 * 9
        assert_eq!(tracker.mutation_rate(), 27.0);
    }

    #[test]
    fn test_streaks_reset_independently() {
        let mut tracker = ConvergenceTracker::new(1.0, 1.0);
        tracker.observe(&gene("0101"), 3.5);
        tracker.observe(&gene("1111"), 3.5);
        assert_eq!(tracker.gene_streak(), 1);
        assert_eq!(tracker.score_streak(), 2);

        tracker.observe(&gene("1111"), 4.0);
        assert_eq!(tracker.gene_streak(), 2);
        assert_eq!(tracker.score_streak(), 1);
        assert_eq!(tracker.mutation_rate(), 5.0);
    }

    #[test]
    fn test_scores_compared_after_rounding() {
        let mut tracker = ConvergenceTracker::new(0.0, 1.0);
        tracker.observe(&gene("01"), 2.000_01);
        tracker.observe(&gene("10"), 2.000_04);
        assert_eq!(tracker.score_streak(), 2);
        tracker.observe(&gene("10"), 2.0002);
        assert_eq!(tracker.score_streak(), 1);
    }
}
