//! Patch plan: what to add to a manifest and where.
//!
//! A [`PatchPlan`] names the files to register, the group to create for them,
//! and the three anchor objects the insertions are positioned against. The
//! default plan registers four SwiftUI views in the Reversi sample project.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{FileType, ObjectId},
};

// ============================================================================
// Defaults
// ============================================================================

/// Files registered when no file list is supplied.
pub const DEFAULT_FILES: [&str; 4] = [
    "GameView.swift",
    "GameStatusView.swift",
    "BoardGridView.swift",
    "GameControlsView.swift",
];

pub const DEFAULT_GROUP_NAME: &str = "SwiftUI";
pub const DEFAULT_PARENT_GROUP: &str = "Reversi";
pub const DEFAULT_PARENT_GROUP_ID: &str = "D642BDB223A9FE4500396732";
pub const DEFAULT_SIBLING: &str = "Models";
pub const DEFAULT_SIBLING_ID: &str = "D636B3A423D432D3007F370E";
pub const DEFAULT_SOURCES_PHASE: &str = "Sources";
pub const DEFAULT_SOURCES_PHASE_ID: &str = "D642BDAE23A9FE4500396732";

// ============================================================================
// SourceFile
// ============================================================================

/// A file to register: its name (also its path relative to the new group)
/// and its `lastKnownFileType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub file_type: FileType,
}

impl SourceFile {
    /// Create a source file, inferring its type from the extension.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let file_type = FileType::infer(&name);
        Self { name, file_type }
    }

    pub fn with_type(mut self, file_type: FileType) -> Self {
        self.file_type = file_type;
        self
    }

    /// Reject names that would corrupt the manifest when interpolated.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.name.as_str();
        let reason = if name.trim().is_empty() {
            Some("name cannot be empty")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else if name.contains(';') || name.contains('"') {
            Some("name cannot contain ';' or '\"'")
        } else if name.contains("/*") || name.contains("*/") {
            Some("name cannot contain comment delimiters")
        } else if name.chars().any(char::is_whitespace) {
            Some("name cannot contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidFileName {
                name: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// GroupSpec
// ============================================================================

/// The group created to hold the registered files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    pub path: String,
}

impl GroupSpec {
    /// A group whose on-disk path equals its display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl Default for GroupSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_NAME)
    }
}

// ============================================================================
// ObjectRef
// ============================================================================

/// Reference to an existing manifest object by its comment name and,
/// optionally, its identifier.
///
/// When `id` is `None` the patcher resolves the identifier by scanning the
/// manifest for a unique object with that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub name: String,
    pub id: Option<ObjectId>,
}

impl ObjectRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a reference from compile-time constants.
    fn known(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: ObjectId::parse(id).ok(),
        }
    }
}

// ============================================================================
// DuplicatePolicy
// ============================================================================

/// What to do when the manifest already contains entries the plan would add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Insert unconditionally. Repeated runs duplicate every entry.
    #[default]
    Append,
    /// Skip files already referenced and a group that already exists.
    Skip,
}

// ============================================================================
// PatchPlan
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPlan {
    pub files: Vec<SourceFile>,
    pub group: GroupSpec,
    /// Group whose children list receives the new group.
    pub parent_group: ObjectRef,
    /// Existing child of `parent_group` the new group is placed before.
    pub sibling: ObjectRef,
    /// Build phase that receives the new build files.
    pub sources_phase: ObjectRef,
    pub duplicates: DuplicatePolicy,
}

impl Default for PatchPlan {
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().copied().map(SourceFile::new).collect(),
            group: GroupSpec::default(),
            parent_group: ObjectRef::known(DEFAULT_PARENT_GROUP, DEFAULT_PARENT_GROUP_ID),
            sibling: ObjectRef::known(DEFAULT_SIBLING, DEFAULT_SIBLING_ID),
            sources_phase: ObjectRef::known(DEFAULT_SOURCES_PHASE, DEFAULT_SOURCES_PHASE_ID),
            duplicates: DuplicatePolicy::Append,
        }
    }
}

impl PatchPlan {
    pub fn builder() -> PatchPlanBuilder {
        PatchPlanBuilder::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidPlan("no files to add".into()));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            file.validate()?;
            if !seen.insert(file.name.as_str()) {
                return Err(DomainError::DuplicateFile {
                    name: file.name.clone(),
                });
            }
        }

        if self.group.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "group name",
            });
        }
        if self.group.path.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "group path",
            });
        }
        for (field, anchor) in [
            ("parent group", &self.parent_group),
            ("sibling", &self.sibling),
            ("sources phase", &self.sources_phase),
        ] {
            if anchor.name.trim().is_empty() {
                return Err(DomainError::InvalidPlan(format!("{field} name is empty")));
            }
        }

        Ok(())
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder starting from the default plan; every setter overrides one field.
#[derive(Debug, Default)]
pub struct PatchPlanBuilder {
    plan: PatchPlan,
    files_set: bool,
}

impl PatchPlanBuilder {
    /// Add a file. The first call replaces the default file list.
    pub fn add_file(mut self, file: SourceFile) -> Self {
        if !self.files_set {
            self.plan.files.clear();
            self.files_set = true;
        }
        self.plan.files.push(file);
        self
    }

    pub fn files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan.files = names.into_iter().map(SourceFile::new).collect();
        self.files_set = true;
        self
    }

    pub fn group(mut self, group: GroupSpec) -> Self {
        self.plan.group = group;
        self
    }

    pub fn parent_group(mut self, anchor: ObjectRef) -> Self {
        self.plan.parent_group = anchor;
        self
    }

    pub fn sibling(mut self, anchor: ObjectRef) -> Self {
        self.plan.sibling = anchor;
        self
    }

    pub fn sources_phase(mut self, anchor: ObjectRef) -> Self {
        self.plan.sources_phase = anchor;
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.plan.duplicates = policy;
        self
    }

    pub fn build(self) -> Result<PatchPlan, DomainError> {
        self.plan.validate()?;
        Ok(self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_matches_reversi_registration() {
        let plan = PatchPlan::default();
        assert_eq!(plan.file_names().collect::<Vec<_>>(), DEFAULT_FILES.to_vec());
        assert_eq!(plan.group.name, "SwiftUI");
        assert_eq!(plan.group.path, "SwiftUI");
        assert_eq!(
            plan.parent_group.id.as_ref().map(ObjectId::as_str),
            Some(DEFAULT_PARENT_GROUP_ID)
        );
        assert_eq!(plan.sibling.name, "Models");
        assert_eq!(plan.duplicates, DuplicatePolicy::Append);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn builder_first_file_replaces_defaults() {
        let plan = PatchPlan::builder()
            .add_file(SourceFile::new("A.swift"))
            .add_file(SourceFile::new("B.m"))
            .build()
            .unwrap();
        assert_eq!(plan.file_names().collect::<Vec<_>>(), vec!["A.swift", "B.m"]);
        assert_eq!(plan.files[1].file_type, FileType::ObjC);
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let result = PatchPlan::builder().files(Vec::<String>::new()).build();
        assert!(matches!(result, Err(DomainError::InvalidPlan(_))));
    }

    #[test]
    fn duplicate_files_are_rejected() {
        let result = PatchPlan::builder().files(["A.swift", "A.swift"]).build();
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateFile {
                name: "A.swift".into()
            }
        );
    }

    #[test]
    fn unsafe_file_names_are_rejected() {
        for name in ["", "a/b.swift", "a;b.swift", "a\"b", "a*/b", "a b.swift"] {
            assert!(
                SourceFile::new(name).validate().is_err(),
                "accepted: {name:?}"
            );
        }
        assert!(SourceFile::new("GameView.swift").validate().is_ok());
    }

    #[test]
    fn empty_group_name_is_rejected() {
        let result = PatchPlan::builder()
            .group(GroupSpec::new(" ").with_path("Views"))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::MissingRequiredField { field: "group name" })
        ));
    }

    #[test]
    fn group_path_defaults_to_name() {
        let group = GroupSpec::new("Views");
        assert_eq!(group.path, "Views");
        assert_eq!(group.with_path("UI/Views").path, "UI/Views");
    }
}
