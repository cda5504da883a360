//! Inspect Service - read-only manifest queries.
//!
//! Reports the sections a manifest contains and whether each anchor a plan
//! depends on can be found. Separated from PatchService so that inspection
//! never needs an identifier source.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::ManifestStore},
    domain::{
        ManifestScan, ObjectLookup, ObjectRef, PatchPlan, Section,
        patcher::{BUILD_FILE_END, FILE_REFERENCE_END, GROUP_END},
        pbxproj::{BUILD_FILE_SECTION, FILE_REFERENCE_SECTION, GROUP_SECTION, SOURCES_PHASE_SECTION},
    },
    error::PatchResult,
};

/// Whether one anchor resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorStatus {
    pub role: &'static str,
    pub name: String,
    /// Identifier found in the manifest, if exactly one object matched.
    pub id: Option<String>,
    pub found: bool,
    pub detail: String,
}

/// DTO describing a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub manifest: PathBuf,
    pub sections: Vec<Section>,
    pub anchors: Vec<AnchorStatus>,
    /// Plan files the manifest already references.
    pub present_files: Vec<String>,
    /// True when the plan's group already exists.
    pub group_present: bool,
}

impl ManifestSummary {
    pub fn anchors_ok(&self) -> bool {
        self.anchors.iter().all(|a| a.found)
    }

    pub fn anchor(&self, role: &str) -> Option<&AnchorStatus> {
        self.anchors.iter().find(|a| a.role == role)
    }

    /// True when a skip-existing run would change nothing.
    pub fn fully_patched(&self, plan: &PatchPlan) -> bool {
        self.group_present && self.present_files.len() == plan.files.len()
    }
}

/// Service for read-only manifest queries.
pub struct InspectService {
    store: Box<dyn ManifestStore>,
}

impl InspectService {
    pub fn new(store: Box<dyn ManifestStore>) -> Self {
        Self { store }
    }

    #[instrument(skip_all, fields(manifest = %path.as_ref().display()))]
    pub fn inspect(&self, path: impl AsRef<Path>, plan: &PatchPlan) -> PatchResult<ManifestSummary> {
        let path = path.as_ref();
        if !self.store.exists(path) {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = self.store.read_to_string(path)?;
        let scan = ManifestScan::new(&text);
        debug!(
            sections = scan.sections().len(),
            objects = scan.objects().len(),
            "Manifest scanned"
        );

        let anchors = vec![
            marker_status(&text, &scan, "build file section", BUILD_FILE_SECTION, BUILD_FILE_END),
            marker_status(&text, &scan, "file reference section", FILE_REFERENCE_SECTION, FILE_REFERENCE_END),
            marker_status(&text, &scan, "group section", GROUP_SECTION, GROUP_END),
            anchor_status(&scan, "parent group", Some(GROUP_SECTION), &plan.parent_group),
            sibling_status(&scan, plan),
            anchor_status(
                &scan,
                "sources phase",
                Some(SOURCES_PHASE_SECTION),
                &plan.sources_phase,
            ),
        ];

        let known = scan.file_reference_paths();
        let present_files = plan
            .file_names()
            .filter(|name| known.iter().any(|k| k == name))
            .map(str::to_string)
            .collect();

        let group_present = scan
            .objects_named(Some(GROUP_SECTION), &plan.group.name)
            .next()
            .is_some();

        Ok(ManifestSummary {
            manifest: path.to_path_buf(),
            sections: scan.sections().to_vec(),
            anchors,
            present_files,
            group_present,
        })
    }
}

/// A section end marker, with the number of objects the section holds.
fn marker_status(
    text: &str,
    scan: &ManifestScan<'_>,
    role: &'static str,
    section: &str,
    marker: &str,
) -> AnchorStatus {
    let found = text.contains(marker);
    let detail = match (found, scan.section(section)) {
        (true, Some(s)) => format!("found, section holds {}", s.object_count),
        (true, None) => "found".to_string(),
        (false, _) => "marker missing".to_string(),
    };
    AnchorStatus {
        role,
        name: marker.to_string(),
        id: None,
        found,
        detail,
    }
}

fn anchor_status(
    scan: &ManifestScan<'_>,
    role: &'static str,
    section: Option<&str>,
    anchor: &ObjectRef,
) -> AnchorStatus {
    let (id, found, detail) = match &anchor.id {
        Some(id) if scan.has_object(id, &anchor.name) => {
            (Some(id.to_string()), true, "found".to_string())
        }
        Some(id) => (
            Some(id.to_string()),
            false,
            format!("no definition for {id} /* {} */", anchor.name),
        ),
        None => match scan.find_object(section, &anchor.name) {
            ObjectLookup::Found(id) => (Some(id.to_string()), true, "resolved by name".into()),
            ObjectLookup::NotFound => (None, false, "no object with this name".into()),
            ObjectLookup::Ambiguous(n) => (None, false, format!("ambiguous: {n} objects")),
        },
    };
    AnchorStatus {
        role,
        name: anchor.name.clone(),
        id,
        found,
        detail,
    }
}

/// The sibling must also be listed among the parent's children.
fn sibling_status(scan: &ManifestScan<'_>, plan: &PatchPlan) -> AnchorStatus {
    let mut status = anchor_status(scan, "sibling", None, &plan.sibling);
    if !status.found {
        return status;
    }
    let parent_id = plan
        .parent_group
        .id
        .as_ref()
        .map(|id| id.to_string())
        .or_else(|| {
            scan.find_object(Some(GROUP_SECTION), &plan.parent_group.name)
                .found()
                .map(|id| id.to_string())
        });
    let (Some(parent_id), Some(sibling_id)) = (parent_id, status.id.clone()) else {
        return status;
    };
    let child_line = format!("{sibling_id} /* {} */,", plan.sibling.name);
    let listed = scan
        .object_body(&parent_id)
        .is_some_and(|body| body.contains(&child_line));
    if !listed {
        status.found = false;
        status.detail = format!("not a child of {parent_id} /* {} */", plan.parent_group.name);
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockManifestStore;

    const MANIFEST: &str = "\
/* Begin PBXFileReference section */
\t\tC0000000000000000000000B /* GameView.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = GameView.swift; sourceTree = \"<group>\"; };
/* End PBXFileReference section */
/* Begin PBXGroup section */
\t\tD642BDB223A9FE4500396732 /* Reversi */ = {
\t\t\tisa = PBXGroup;
\t\t\tchildren = (
\t\t\t\tD636B3A423D432D3007F370E /* Models */,
\t\t\t);
\t\t};
\t\tD636B3A423D432D3007F370E /* Models */ = {
\t\t\tisa = PBXGroup;
\t\t\tchildren = (
\t\t\t);
\t\t};
/* End PBXGroup section */
";

    fn service(text: &str) -> InspectService {
        let text = text.to_string();
        let mut store = MockManifestStore::new();
        store.expect_exists().return_const(true);
        store
            .expect_read_to_string()
            .returning(move |_| Ok(text.clone()));
        store.expect_write().never();
        InspectService::new(Box::new(store))
    }

    #[test]
    fn reports_sections_and_anchor_status() {
        let summary = service(MANIFEST)
            .inspect("project.pbxproj", &PatchPlan::default())
            .unwrap();

        let names: Vec<_> = summary.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["PBXFileReference", "PBXGroup"]);

        let found = |role| summary.anchor(role).unwrap().found;
        assert!(!found("build file section"));
        assert!(found("file reference section"));
        assert!(found("group section"));
        assert!(found("parent group"));
        assert!(found("sibling"));
        assert!(!found("sources phase"));
        assert!(!summary.anchors_ok());
        assert_eq!(summary.present_files, vec!["GameView.swift".to_string()]);
        assert!(!summary.group_present);
    }

    #[test]
    fn sibling_outside_parent_is_reported() {
        let text = MANIFEST.replace("\t\t\t\tD636B3A423D432D3007F370E /* Models */,\n", "");
        let summary = service(&text)
            .inspect("project.pbxproj", &PatchPlan::default())
            .unwrap();
        let sibling = summary.anchor("sibling").unwrap();
        assert!(!sibling.found);
        assert!(sibling.detail.starts_with("not a child"));
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let mut store = MockManifestStore::new();
        store.expect_exists().return_const(false);
        let err = InspectService::new(Box::new(store))
            .inspect("nope.pbxproj", &PatchPlan::default())
            .unwrap_err();
        assert!(err.to_string().contains("Manifest not found"));
    }

    #[test]
    fn section_markers_count_their_entries() {
        let text = format!(
            "/* Begin PBXBuildFile section */\n\t\tC0000000000000000000000A /* GameView.swift in Sources */ = {{isa = PBXBuildFile; fileRef = C0000000000000000000000B /* GameView.swift */; }};\n/* End PBXBuildFile section */\n{MANIFEST}"
        );
        let summary = service(&text)
            .inspect("project.pbxproj", &PatchPlan::default())
            .unwrap();

        assert_eq!(summary.anchor("build file section").unwrap().detail, "found, section holds 1");
        assert_eq!(summary.anchor("file reference section").unwrap().detail, "found, section holds 1");
        assert_eq!(summary.anchor("group section").unwrap().detail, "found, section holds 2");
    }
}
