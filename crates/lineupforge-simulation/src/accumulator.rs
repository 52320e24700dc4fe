//! Mergeable per-lineup statistics.

/// Running score statistics for one lineup.
///
/// Holds the count, mean and second and third central moment sums, a
/// fixed-range histogram for percentiles, and the payout tallies. Two
/// accumulators over disjoint iterations merge into the accumulator of
/// their union without revisiting samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    min: f64,
    max: f64,
    low: f64,
    width: f64,
    histogram: Vec<u64>,
    payout_sum: f64,
    cashed: u64,
    made_cut: u64,
}

impl ScoreAccumulator {
    /// Histogram of `bins` equal buckets over `[low, high]`. Scores outside
    /// the range land in the edge buckets.
    pub fn new(low: f64, high: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let span = if high > low { high - low } else { 1.0 };
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            low,
            width: span / bins as f64,
            histogram: vec![0; bins],
            payout_sum: 0.0,
            cashed: 0,
            made_cut: 0,
        }
    }

    pub fn record_score(&mut self, score: f64) {
        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;
        let delta = score - self.mean;
        let delta_n = delta / n;
        let term = delta * delta_n * n1;

        self.mean += delta_n;
        self.m3 += term * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term;
        self.min = self.min.min(score);
        self.max = self.max.max(score);

        let last = self.histogram.len() - 1;
        let bin = ((score - self.low) / self.width).floor();
        let bin = if bin <= 0.0 { 0 } else { (bin as usize).min(last) };
        self.histogram[bin] += 1;
    }

    pub fn record_payout(&mut self, payout: f64) {
        self.payout_sum += payout;
        if payout > 0.0 {
            self.cashed += 1;
        }
    }

    pub fn record_cut(&mut self, made: bool) {
        if made {
            self.made_cut += 1;
        }
    }

    /// Folds `other` into `self`. Both must share histogram bounds.
    pub fn merge(&mut self, other: &ScoreAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;

        let m2 = self.m2 + other.m2 + delta * delta * na * nb / n;
        let m3 = self.m3
            + other.m3
            + delta.powi(3) * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;

        self.mean += delta * nb / n;
        self.m2 = m2;
        self.m3 = m3;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        for (bin, extra) in self.histogram.iter_mut().zip(&other.histogram) {
            *bin += extra;
        }
        self.payout_sum += other.payout_sum;
        self.cashed += other.cashed;
        self.made_cut += other.made_cut;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).max(0.0).sqrt()
    }

    /// Sample skewness `g1`; zero when the scores do not vary.
    pub fn skewness(&self) -> f64 {
        if self.count < 2 || self.m2 <= f64::EPSILON {
            return 0.0;
        }
        (self.count as f64).sqrt() * self.m3 / self.m2.powf(1.5)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Score at percentile `p` in `0..=100`, interpolated inside the
    /// histogram bucket and clamped to the observed range.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let target = (p / 100.0).clamp(0.0, 1.0) * self.count as f64;
        if target <= 0.0 {
            return self.min;
        }
        if target >= self.count as f64 {
            return self.max;
        }
        let mut below = 0u64;
        for (i, &c) in self.histogram.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let through = below + c;
            if through as f64 >= target {
                let frac = (target - below as f64) / c as f64;
                let score = self.low + (i as f64 + frac) * self.width;
                return score.clamp(self.min, self.max);
            }
            below = through;
        }
        self.max
    }

    pub fn mean_payout(&self) -> f64 {
        self.ratio(self.payout_sum)
    }

    /// Fraction of iterations with a positive payout.
    pub fn cash_rate(&self) -> f64 {
        self.ratio(self.cashed as f64)
    }

    pub fn cut_rate(&self) -> f64 {
        self.ratio(self.made_cut as f64)
    }

    fn ratio(&self, total: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            total / self.count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(scores: &[f64]) -> ScoreAccumulator {
        let mut acc = ScoreAccumulator::new(0.0, 100.0, 100);
        for &s in scores {
            acc.record_score(s);
        }
        acc
    }

    #[test]
    fn test_moments_of_known_sample() {
        let acc = filled(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(acc.count(), 8);
        assert!((acc.mean() - 5.0).abs() < 1e-12);
        // Population variance 4, sample variance 32/7
        assert!((acc.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(acc.skewness() > 0.0);
        assert_eq!(acc.min(), 2.0);
        assert_eq!(acc.max(), 9.0);
    }

    #[test]
    fn test_merge_matches_sequential() {
        let scores: Vec<f64> = (0..200).map(|i| ((i * 37) % 91) as f64 + 0.25).collect();
        let whole = filled(&scores);

        let mut left = filled(&scores[..73]);
        let right = filled(&scores[73..]);
        left.merge(&right);

        assert_eq!(left.count(), whole.count());
        assert!((left.mean() - whole.mean()).abs() < 1e-9);
        assert!((left.std_dev() - whole.std_dev()).abs() < 1e-9);
        assert!((left.skewness() - whole.skewness()).abs() < 1e-9);
        assert_eq!(left.percentile(50.0), whole.percentile(50.0));
    }

    #[test]
    fn test_merge_into_empty() {
        let mut empty = ScoreAccumulator::new(0.0, 100.0, 100);
        let full = filled(&[10.0, 20.0]);
        empty.merge(&full);
        assert_eq!(empty, full);

        let mut full_again = full.clone();
        full_again.merge(&ScoreAccumulator::new(0.0, 100.0, 100));
        assert_eq!(full_again, full);
    }

    #[test]
    fn test_percentiles_of_uniform_scores() {
        let scores: Vec<f64> = (0..1_000).map(|i| i as f64 / 10.0).collect();
        let acc = filled(&scores);

        assert!((acc.percentile(50.0) - 50.0).abs() < 1.0);
        assert!((acc.percentile(90.0) - 90.0).abs() < 1.0);
        assert_eq!(acc.percentile(0.0), 0.0);
        assert_eq!(acc.percentile(100.0), 99.9);
    }

    #[test]
    fn test_out_of_range_scores_clamp_to_edges() {
        let acc = filled(&[-50.0, 150.0]);
        assert_eq!(acc.percentile(0.0), -50.0);
        assert_eq!(acc.percentile(100.0), 150.0);
    }

    #[test]
    fn test_payout_tallies() {
        let mut acc = filled(&[10.0, 20.0, 30.0, 40.0]);
        for payout in [0.0, 0.0, 40.0, 120.0] {
            acc.record_payout(payout);
        }
        acc.record_cut(true);
        acc.record_cut(false);

        assert_eq!(acc.mean_payout(), 40.0);
        assert_eq!(acc.cash_rate(), 0.5);
        assert_eq!(acc.cut_rate(), 0.25);
    }
}
