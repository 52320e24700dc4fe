//! Pairwise lineup diversity.

use lineupforge_core::PlayerId;

/// Players of `candidate` absent from `other`. `other` must be sorted.
pub fn differing(candidate: &[PlayerId], other: &[PlayerId]) -> usize {
    candidate
        .iter()
        .filter(|id| other.binary_search(id).is_err())
        .count()
}

/// Minimum-difference requirement between accepted lineups.
///
/// Relaxes one player at a time and never below one, so two lineups in a
/// batch are never identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversityFilter {
    min_different: usize,
}

impl DiversityFilter {
    pub fn new(min_different: usize) -> Self {
        Self { min_different }
    }

    pub fn min_different(&self) -> usize {
        self.min_different
    }

    /// Index of the first accepted lineup the candidate is too close to.
    pub fn first_conflict(&self, candidate: &[PlayerId], accepted: &[Vec<PlayerId>]) -> Option<usize> {
        if self.min_different == 0 {
            return None;
        }
        accepted
            .iter()
            .position(|other| differing(candidate, other) < self.min_different)
    }

    /// Lowers the requirement by one. Returns `(from, to)`, or `None` at the floor.
    pub fn relax(&mut self) -> Option<(usize, usize)> {
        if self.min_different <= 1 {
            return None;
        }
        let from = self.min_different;
        self.min_different -= 1;
        Some((from, self.min_different))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<PlayerId> {
        raw.iter().map(|&id| PlayerId(id)).collect()
    }

    #[test]
    fn test_differing_counts_candidate_side() {
        assert_eq!(differing(&ids(&[1, 2, 3, 4]), &ids(&[1, 2, 5, 6])), 2);
        assert_eq!(differing(&ids(&[1, 2]), &ids(&[1, 2])), 0);
    }

    #[test]
    fn test_first_conflict() {
        let accepted = vec![ids(&[1, 2, 3, 4]), ids(&[5, 6, 7, 8])];
        let filter = DiversityFilter::new(2);

        assert_eq!(filter.first_conflict(&ids(&[1, 2, 3, 9]), &accepted), Some(0));
        assert_eq!(filter.first_conflict(&ids(&[1, 2, 7, 8]), &accepted), None);
        assert_eq!(DiversityFilter::new(0).first_conflict(&ids(&[1, 2, 3, 4]), &accepted), None);
    }

    #[test]
    fn test_relax_floors_at_one() {
        let mut filter = DiversityFilter::new(2);
        assert_eq!(filter.relax(), Some((2, 1)));
        assert_eq!(filter.relax(), None);
        assert_eq!(filter.min_different(), 1);
    }
}
