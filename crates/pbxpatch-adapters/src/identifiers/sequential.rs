//! Deterministic identifiers for tests and reproducible dry runs.

use std::sync::atomic::{AtomicU64, Ordering};

use pbxpatch_core::{application::ports::IdentifierSource, domain::ObjectId};

const MAX_PREFIX_DIGITS: usize = 8;

/// Hands out `<prefix><counter>` identifiers, padded to 24 hex digits.
#[derive(Debug)]
pub struct SequentialIdentifierSource {
    prefix: u128,
    shift: u32,
    next: AtomicU64,
}

impl SequentialIdentifierSource {
    /// `prefix` is kept when it is 1 to 8 hex digits; anything else falls
    /// back to `"E"`.
    pub fn new(prefix: &str) -> Self {
        let (prefix, digits) = match u128::from_str_radix(prefix, 16) {
            Ok(value) if !prefix.is_empty() && prefix.len() <= MAX_PREFIX_DIGITS => {
                (value, prefix.len())
            }
            _ => (0xE, 1),
        };
        Self {
            prefix,
            shift: 4 * (24 - digits) as u32,
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdentifierSource {
    fn default() -> Self {
        Self::new("E")
    }
}

impl IdentifierSource for SequentialIdentifierSource {
    fn next_id(&self) -> ObjectId {
        let n = u128::from(self.next.fetch_add(1, Ordering::Relaxed));
        ObjectId::from_bits((self.prefix << self.shift) | n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_from_one() {
        let source = SequentialIdentifierSource::new("AB");
        assert_eq!(source.next_id().as_str(), "AB0000000000000000000001");
        assert_eq!(source.next_id().as_str(), "AB0000000000000000000002");
    }

    #[test]
    fn invalid_prefix_falls_back() {
        let source = SequentialIdentifierSource::new("zz");
        assert_eq!(source.next_id().as_str(), "E00000000000000000000001");
    }
}
