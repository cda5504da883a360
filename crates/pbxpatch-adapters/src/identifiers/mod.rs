//! Identifier source adapters.

mod sequential;
mod uuid;

pub use self::uuid::UuidIdentifierSource;
pub use sequential::SequentialIdentifierSource;
