use agora_types::models::UserId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, StoreError};

/// Draws account identifiers at random from `1..=space`, redrawing when the
/// candidate is already taken.
pub(crate) struct IdAllocator {
    rng: StdRng,
    space: u32,
    attempts: u32,
}

impl IdAllocator {
    pub fn new(space: u32, attempts: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            space: space.max(1),
            attempts: attempts.max(1),
        }
    }

    /// Returns an id for which `taken` is false.
    pub fn allocate(&mut self, taken: impl Fn(UserId) -> bool) -> Result<UserId> {
        for _ in 0..self.attempts {
            let id = self.rng.random_range(1..=self.space);
            if !taken(id) {
                return Ok(id);
            }
        }

        Err(StoreError::IdSpaceExhausted {
            space: self.space,
            attempts: self.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut ids = IdAllocator::new(10, 8, Some(1));
        for _ in 0..100 {
            let id = ids.allocate(|_| false).unwrap();
            assert!((1..=10).contains(&id));
        }
    }

    #[test]
    fn skips_taken_ids() {
        let mut ids = IdAllocator::new(2, 64, Some(3));
        for _ in 0..20 {
            assert_eq!(ids.allocate(|id| id == 1).unwrap(), 2);
        }
    }

    #[test]
    fn exhausted_space_is_an_error() {
        let mut ids = IdAllocator::new(1, 4, Some(5));
        assert_eq!(ids.allocate(|_| false).unwrap(), 1);
        assert_eq!(
            ids.allocate(|id| id == 1),
            Err(StoreError::IdSpaceExhausted { space: 1, attempts: 4 })
        );
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = IdAllocator::new(1_000_000, 8, Some(99));
        let mut b = IdAllocator::new(1_000_000, 8, Some(99));
        for _ in 0..10 {
            assert_eq!(a.allocate(|_| false), b.allocate(|_| false));
        }
    }
}
