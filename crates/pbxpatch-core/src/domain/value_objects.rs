//! Domain value objects: ObjectId, FileType.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ObjectId ─────────────────────────────────────────────────────────────────

/// Length of an object identifier in a project manifest.
pub const OBJECT_ID_LEN: usize = 24;

/// A manifest object identifier: exactly 24 uppercase hexadecimal characters.
///
/// Construction always validates, so holding an `ObjectId` means the token
/// can be written into a manifest verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an identifier.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.len() != OBJECT_ID_LEN {
            return Err(DomainError::InvalidObjectId {
                value,
                reason: "must be exactly 24 characters",
            });
        }
        if !value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
            return Err(DomainError::InvalidObjectId {
                value,
                reason: "must contain only uppercase hexadecimal digits",
            });
        }
        Ok(Self(value))
    }

    /// Build an identifier from the low 96 bits of `bits`.
    ///
    /// Infallible: every 96-bit value renders as exactly 24 hex digits.
    pub fn from_bits(bits: u128) -> Self {
        const MASK: u128 = (1 << 96) - 1;
        Self(format!("{:024X}", bits & MASK))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

// ── FileType ─────────────────────────────────────────────────────────────────

/// The `lastKnownFileType` recorded on a file reference.
///
/// Inferred from the file extension; `Other` carries any explicit value the
/// user supplies that is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FileType {
    Swift,
    ObjC,
    ObjCpp,
    C,
    Cpp,
    Header,
    Metal,
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Swift => "sourcecode.swift",
            Self::ObjC => "sourcecode.c.objc",
            Self::ObjCpp => "sourcecode.cpp.objcpp",
            Self::C => "sourcecode.c.c",
            Self::Cpp => "sourcecode.cpp.cpp",
            Self::Header => "sourcecode.c.h",
            Self::Metal => "sourcecode.metal",
            Self::Other(s) => s,
        }
    }

    /// Infer the file type from a file name's extension.
    ///
    /// Unknown extensions fall back to `sourcecode.swift`.
    pub fn infer(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "m" => Self::ObjC,
            "mm" => Self::ObjCpp,
            "c" => Self::C,
            "cc" | "cpp" | "cxx" => Self::Cpp,
            "h" | "hpp" => Self::Header,
            "metal" => Self::Metal,
            _ => Self::Swift,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FileType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sourcecode.swift" => Self::Swift,
            "sourcecode.c.objc" => Self::ObjC,
            "sourcecode.cpp.objcpp" => Self::ObjCpp,
            "sourcecode.c.c" => Self::C,
            "sourcecode.cpp.cpp" => Self::Cpp,
            "sourcecode.c.h" => Self::Header,
            "sourcecode.metal" => Self::Metal,
            _ => Self::Other(s),
        }
    }
}

impl From<FileType> for String {
    fn from(t: FileType) -> Self {
        t.as_str().to_string()
    }
}
