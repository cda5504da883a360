//! Random identifiers derived from v4 UUIDs.

use pbxpatch_core::{application::ports::IdentifierSource, domain::ObjectId};
use uuid::Uuid;

/// Draws identifiers from the first 24 hex digits of a random UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdentifierSource;

impl UuidIdentifierSource {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierSource for UuidIdentifierSource {
    fn next_id(&self) -> ObjectId {
        // High 96 bits, i.e. the first 24 digits of the simple form.
        ObjectId::from_bits(Uuid::new_v4().as_u128() >> 32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_24_uppercase_hex_digits() {
        let source = UuidIdentifierSource::new();
        for _ in 0..100 {
            let id = source.next_id();
            assert_eq!(id.as_str().len(), 24);
            assert!(
                id.as_str()
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
            );
        }
    }

    #[test]
    fn successive_draws_differ() {
        let source = UuidIdentifierSource::new();
        assert_ne!(source.next_id(), source.next_id());
    }
}
