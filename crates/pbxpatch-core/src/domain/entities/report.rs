//! Result of a patch run.
//!
//! The report records the identifiers that were generated and, for each of
//! the five insertion points, whether text was actually inserted.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::ObjectId;

/// A place in the manifest where the patcher inserts text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionPoint {
    BuildFileSection,
    FileReferenceSection,
    ParentGroupChildren,
    GroupSection,
    SourcesBuildPhase,
}

impl InsertionPoint {
    /// All insertion points, in the order the patcher applies them.
    pub const ALL: [InsertionPoint; 5] = [
        Self::BuildFileSection,
        Self::FileReferenceSection,
        Self::ParentGroupChildren,
        Self::GroupSection,
        Self::SourcesBuildPhase,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildFileSection => "PBXBuildFile section",
            Self::FileReferenceSection => "PBXFileReference section",
            Self::ParentGroupChildren => "parent group children",
            Self::GroupSection => "PBXGroup section",
            Self::SourcesBuildPhase => "sources build phase",
        }
    }
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened at one insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum InsertionOutcome {
    /// Text was inserted; `entries` is the number of records added.
    Applied { entries: usize },
    /// The anchor was not found, so the section was left untouched.
    AnchorMissing { anchor: String },
    /// Nothing to insert under the skip-duplicates policy.
    AlreadyPresent,
}

impl InsertionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::AnchorMissing { .. })
    }
}

/// Identifiers generated for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileIds {
    pub name: String,
    pub file_ref: ObjectId,
    pub build_file: ObjectId,
}

/// Every identifier generated during one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedIds {
    pub files: Vec<FileIds>,
    /// The new group's id, or the existing one it was merged into. `None`
    /// when no group was needed.
    pub group: Option<ObjectId>,
}

impl GeneratedIds {
    pub fn all(&self) -> impl Iterator<Item = &ObjectId> {
        self.files
            .iter()
            .flat_map(|f| [&f.file_ref, &f.build_file])
            .chain(self.group.as_ref())
    }

    pub fn for_file(&self, name: &str) -> Option<&FileIds> {
        self.files.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub manifest: PathBuf,
    pub group_name: String,
    pub ids: GeneratedIds,
    pub outcomes: Vec<(InsertionPoint, InsertionOutcome)>,
    /// Files left out because the manifest already referenced them.
    pub skipped_files: Vec<String>,
    /// `false` for dry runs and refused strict runs.
    pub written: bool,
}

impl PatchReport {
    pub fn outcome(&self, point: InsertionPoint) -> Option<&InsertionOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| *p == point)
            .map(|(_, outcome)| outcome)
    }

    /// True when every anchor was found.
    pub fn is_complete(&self) -> bool {
        !self.outcomes.iter().any(|(_, o)| o.is_missing())
    }

    pub fn missing_anchors(&self) -> impl Iterator<Item = (InsertionPoint, &str)> {
        self.outcomes.iter().filter_map(|(point, outcome)| match outcome {
            InsertionOutcome::AnchorMissing { anchor } => Some((*point, anchor.as_str())),
            _ => None,
        })
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_applied()).count()
    }

    /// True when the manifest text changed.
    pub fn changed(&self) -> bool {
        self.applied_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ObjectId {
        ObjectId::parse(format!("{n:024X}")).unwrap()
    }

    fn report(outcomes: Vec<(InsertionPoint, InsertionOutcome)>) -> PatchReport {
        PatchReport {
            manifest: PathBuf::from("project.pbxproj"),
            group_name: "SwiftUI".into(),
            ids: GeneratedIds {
                files: vec![FileIds {
                    name: "A.swift".into(),
                    file_ref: id(1),
                    build_file: id(2),
                }],
                group: Some(id(3)),
            },
            outcomes,
            skipped_files: Vec::new(),
            written: true,
        }
    }

    #[test]
    fn complete_when_no_anchor_missing() {
        let r = report(vec![
            (InsertionPoint::BuildFileSection, InsertionOutcome::Applied { entries: 1 }),
            (InsertionPoint::GroupSection, InsertionOutcome::AlreadyPresent),
        ]);
        assert!(r.is_complete());
        assert_eq!(r.applied_count(), 1);
        assert!(r.changed());
    }

    #[test]
    fn missing_anchor_is_reported() {
        let r = report(vec![(
            InsertionPoint::ParentGroupChildren,
            InsertionOutcome::AnchorMissing {
                anchor: "Models".into(),
            },
        )]);
        assert!(!r.is_complete());
        assert!(!r.changed());
        let missing: Vec<_> = r.missing_anchors().collect();
        assert_eq!(missing, vec![(InsertionPoint::ParentGroupChildren, "Models")]);
    }

    #[test]
    fn generated_ids_iterates_every_token() {
        let r = report(Vec::new());
        assert_eq!(r.ids.all().count(), 3);
        assert_eq!(r.ids.for_file("A.swift").unwrap().build_file, id(2));
        assert!(r.ids.for_file("B.swift").is_none());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(InsertionOutcome::Applied { entries: 4 }).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["entries"], 4);
    }
}
