//! Candidate factory.
//!
//! Modules never construct output `Candidate`s directly; they ask the
//! factory, which hands out zeroed candidates and keeps a process-lifetime
//! allocation count for end-of-run accounting.

use kiransim_models::Candidate;

/// Creates output candidates and counts allocations.
#[derive(Debug, Default)]
pub struct CandidateFactory {
    allocated: u64,
}

impl CandidateFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a zeroed candidate.
    pub fn new_candidate(&mut self) -> Candidate {
        self.allocated += 1;
        Candidate::default()
    }

    /// Total candidates created over the factory's lifetime.
    pub fn allocated(&self) -> u64 {
        self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiransim_models::{FourMomentum, Position};

    #[test]
    fn test_new_candidate_is_zeroed() {
        let mut factory = CandidateFactory::new();
        let c = factory.new_candidate();
        assert_eq!(c.momentum, FourMomentum::ZERO);
        assert_eq!(c.position, Position::ORIGIN);
    }

    #[test]
    fn test_allocation_counter() {
        let mut factory = CandidateFactory::new();
        assert_eq!(factory.allocated(), 0);
        for _ in 0..3 {
            factory.new_candidate();
        }
        assert_eq!(factory.allocated(), 3);
    }
}
