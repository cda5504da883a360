//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pbxpatch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ManifestStore`: manifest read/write
//!   - `IdentifierSource`: fresh object identifiers
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{IdentifierSource, ManifestStore};

#[cfg(test)]
pub use output::{MockIdentifierSource, MockManifestStore};
