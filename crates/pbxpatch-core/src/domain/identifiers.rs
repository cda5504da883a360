//! Identifier allocation with collision avoidance.

use std::collections::HashSet;

use crate::domain::{error::DomainError, value_objects::ObjectId};

/// Upper bound on draws per identifier before giving up.
pub const MAX_ATTEMPTS: usize = 64;

/// Hands out identifiers that are unique within one run and absent from
/// the manifest being patched.
pub struct IdAllocator<F> {
    source: F,
    taken: HashSet<String>,
}

impl<F> IdAllocator<F>
where
    F: FnMut() -> ObjectId,
{
    /// `taken` holds every identifier already present in the manifest.
    pub fn new(source: F, taken: HashSet<String>) -> Self {
        Self { source, taken }
    }

    pub fn allocate(&mut self) -> Result<ObjectId, DomainError> {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = (self.source)();
            if self.taken.insert(candidate.as_str().to_string()) {
                return Ok(candidate);
            }
            tracing::debug!(id = %candidate, "identifier collision, drawing again");
        }
        Err(DomainError::IdentifierSpaceExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ObjectId {
        ObjectId::parse(format!("{n:024X}")).unwrap()
    }

    #[test]
    fn skips_identifiers_already_in_manifest() {
        let mut n = 0;
        let taken = HashSet::from([id(1).to_string(), id(2).to_string()]);
        let mut alloc = IdAllocator::new(
            || {
                n += 1;
                id(n)
            },
            taken,
        );
        assert_eq!(alloc.allocate().unwrap(), id(3));
        assert_eq!(alloc.allocate().unwrap(), id(4));
    }

    #[test]
    fn never_repeats_within_a_run() {
        let mut calls = 0;
        let mut alloc = IdAllocator::new(
            || {
                calls += 1;
                id(calls / 2)
            },
            HashSet::new(),
        );
        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn gives_up_on_a_stuck_source() {
        let mut alloc = IdAllocator::new(|| id(7), HashSet::new());
        alloc.allocate().unwrap();
        assert_eq!(
            alloc.allocate(),
            Err(DomainError::IdentifierSpaceExhausted {
                attempts: MAX_ATTEMPTS
            })
        );
    }
}
