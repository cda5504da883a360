//! Read-only structural scan of a project manifest.
//!
//! This is not a parser for the property-list grammar. It recognises the
//! three shapes the patcher cares about:
//!
//! - section markers: `/* Begin PBXGroup section */` … `/* End PBXGroup section */`
//! - object headers: `D642BDB223A9FE4500396732 /* Reversi */ = {`
//! - file reference paths: `path = GameView.swift;`
//!
//! Everything else in the manifest is opaque text.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::value_objects::ObjectId;

pub const BUILD_FILE_SECTION: &str = "PBXBuildFile";
pub const FILE_REFERENCE_SECTION: &str = "PBXFileReference";
pub const GROUP_SECTION: &str = "PBXGroup";
pub const SOURCES_PHASE_SECTION: &str = "PBXSourcesBuildPhase";

static BEGIN_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\* Begin (\w+) section \*/").expect("valid regex"));

static OBJECT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([0-9A-F]{24}) /\* (.*?) \*/ = \{").expect("valid regex")
});

static FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bpath = "?([^";]*?)"?;"#).expect("valid regex"));

static HEX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9A-F]{24}\b").expect("valid regex"));

/// A `Begin`/`End` delimited section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    /// Byte range from the start of the `Begin` marker to the end of the `End` marker.
    #[serde(skip)]
    pub range: Range<usize>,
    pub object_count: usize,
}

/// An object definition header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub id: ObjectId,
    pub comment: String,
    pub section: Option<String>,
    pub offset: usize,
}

/// Result of looking an object up by its comment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLookup {
    Found(ObjectId),
    NotFound,
    Ambiguous(usize),
}

impl ObjectLookup {
    pub fn found(self) -> Option<ObjectId> {
        match self {
            Self::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// Index of sections and object headers over one manifest text.
#[derive(Debug, Clone)]
pub struct ManifestScan<'a> {
    text: &'a str,
    sections: Vec<Section>,
    objects: Vec<ObjectHeader>,
}

impl<'a> ManifestScan<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut sections = scan_sections(text);
        let objects: Vec<ObjectHeader> = OBJECT_HEADER
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let id = ObjectId::parse(caps.get(1)?.as_str()).ok()?;
                let offset = whole.start();
                let section = sections
                    .iter()
                    .find(|s| s.range.contains(&offset))
                    .map(|s| s.name.clone());
                Some(ObjectHeader {
                    id,
                    comment: caps.get(2)?.as_str().to_string(),
                    section,
                    offset,
                })
            })
            .collect();

        for section in &mut sections {
            section.object_count = objects
                .iter()
                .filter(|o| o.section.as_deref() == Some(section.name.as_str()))
                .count();
        }

        Self {
            text,
            sections,
            objects,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn objects(&self) -> &[ObjectHeader] {
        &self.objects
    }

    /// Object headers with the given comment, optionally restricted to a section.
    pub fn objects_named<'s>(
        &'s self,
        section: Option<&'s str>,
        name: &'s str,
    ) -> impl Iterator<Item = &'s ObjectHeader> + 's {
        self.objects.iter().filter(move |o| {
            o.comment == name && section.is_none_or(|s| o.section.as_deref() == Some(s))
        })
    }

    /// Find the unique object with the given comment.
    pub fn find_object(&self, section: Option<&str>, name: &str) -> ObjectLookup {
        let mut matches = self.objects_named(section, name);
        match (matches.next(), matches.next()) {
            (None, _) => ObjectLookup::NotFound,
            (Some(only), None) => ObjectLookup::Found(only.id.clone()),
            (Some(_), Some(_)) => ObjectLookup::Ambiguous(2 + matches.count()),
        }
    }

    /// Whether an object with this id and comment has a definition header.
    pub fn has_object(&self, id: &ObjectId, name: &str) -> bool {
        self.objects.iter().any(|o| &o.id == id && o.comment == name)
    }

    /// Text of an object definition from its header up to the first closing
    /// brace. Nested dictionaries are not expected in the objects we inspect.
    pub fn object_body(&self, id: &str) -> Option<&'a str> {
        let header = self.objects.iter().find(|o| o.id.as_str() == id)?;
        let rest = &self.text[header.offset..];
        let open = rest.find('{')?;
        let close = rest[open..].find('}')?;
        Some(&rest[..open + close + 1])
    }

    /// `path` values of every file reference.
    pub fn file_reference_paths(&self) -> Vec<String> {
        let Some(section) = self.section(FILE_REFERENCE_SECTION) else {
            return Vec::new();
        };
        FILE_PATH
            .captures_iter(&self.text[section.range.clone()])
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Every 24-character hex token in the manifest.
    pub fn hex_ids(&self) -> HashSet<String> {
        HEX_ID
            .find_iter(self.text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn scan_sections(text: &str) -> Vec<Section> {
    BEGIN_SECTION
        .captures_iter(text)
        .filter_map(|caps| {
            let begin = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let end_marker = format!("/* End {name} section */");
            let end = text[begin.end()..]
                .find(&end_marker)
                .map(|rel| begin.end() + rel + end_marker.len())?;
            Some(Section {
                name: name.to_string(),
                range: begin.start()..end,
                object_count: 0,
            })
        })
        .collect()
}
