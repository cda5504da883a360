//! The manifest patcher.
//!
//! Pure text transformation: given manifest text, a plan, and an identifier
//! source, produce the patched text and an outcome per insertion point.
//! Section terminators are located by literal search; the parent group and
//! the sources phase are located by regex, confined to the anchor object so a
//! missing sibling never splices into an unrelated object.
//!
//! A missing anchor leaves its section untouched and never stops the
//! remaining insertions.

use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::{
    entities::{
        DuplicatePolicy, FileIds, GeneratedIds, InsertionOutcome, InsertionPoint, ObjectRef,
        PatchPlan, SourceFile,
    },
    error::DomainError,
    fragments::{self, FileEntry},
    identifiers::IdAllocator,
    pbxproj::{GROUP_SECTION, ManifestScan, ObjectLookup, SOURCES_PHASE_SECTION},
    validation::DomainValidator,
    value_objects::ObjectId,
};

pub const BUILD_FILE_END: &str = "/* End PBXBuildFile section */";
pub const FILE_REFERENCE_END: &str = "/* End PBXFileReference section */";
pub const GROUP_END: &str = "/* End PBXGroup section */";

const DEFAULT_CHILD_INDENT: &str = "\t\t\t\t";

/// Text and outcomes produced by one patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutput {
    pub text: String,
    pub ids: GeneratedIds,
    pub outcomes: Vec<(InsertionPoint, InsertionOutcome)>,
    pub skipped_files: Vec<String>,
}

/// Applies one [`PatchPlan`] to manifest text.
pub struct Patcher<'p> {
    plan: &'p PatchPlan,
}

/// State of the target group in the manifest before patching.
enum ExistingGroup {
    Absent,
    Present(ObjectId),
    Ambiguous(usize),
}

impl<'p> Patcher<'p> {
    pub fn new(plan: &'p PatchPlan) -> Self {
        Self { plan }
    }

    /// Patch `text`, drawing identifiers from `next_id`.
    pub fn apply<F>(&self, text: &str, next_id: F) -> Result<PatchOutput, DomainError>
    where
        F: FnMut() -> ObjectId,
    {
        DomainValidator::validate_plan(self.plan)?;

        let scan = ManifestScan::new(text);
        let (pending, skipped_files) = self.pending_files(&scan);
        let existing_group = self.existing_group(&scan);

        let mut allocator = IdAllocator::new(next_id, scan.hex_ids());
        let mut file_ids = Vec::with_capacity(pending.len());
        for file in &pending {
            let ids = FileIds {
                name: file.name.clone(),
                file_ref: allocator.allocate()?,
                build_file: allocator.allocate()?,
            };
            debug!(file = %ids.name, file_ref = %ids.file_ref, build_file = %ids.build_file, "Allocated identifiers");
            file_ids.push(ids);
        }
        // A group is only created when some file still needs a home.
        let group_id = match &existing_group {
            ExistingGroup::Present(id) => Some(id.clone()),
            ExistingGroup::Absent if !pending.is_empty() => {
                let id = allocator.allocate()?;
                debug!(group = %self.plan.group.name, id = %id, "Allocated group identifier");
                Some(id)
            }
            ExistingGroup::Absent | ExistingGroup::Ambiguous(_) => None,
        };

        let entries: Vec<FileEntry<'_>> = pending.iter().copied().zip(file_ids.iter()).collect();

        let mut text = text.to_string();
        let mut outcomes = Vec::with_capacity(InsertionPoint::ALL.len());

        // 1. Build files
        let outcome = if entries.is_empty() {
            InsertionOutcome::AlreadyPresent
        } else {
            insert_before_literal(
                &mut text,
                BUILD_FILE_END,
                &fragments::build_file_entries(&entries),
                BUILD_FILE_END,
                entries.len(),
            )
        };
        outcomes.push((InsertionPoint::BuildFileSection, outcome));

        // 2. File references
        let outcome = if entries.is_empty() {
            InsertionOutcome::AlreadyPresent
        } else {
            insert_before_literal(
                &mut text,
                FILE_REFERENCE_END,
                &fragments::file_reference_entries(&entries),
                FILE_REFERENCE_END,
                entries.len(),
            )
        };
        outcomes.push((InsertionPoint::FileReferenceSection, outcome));

        // 3 + 4. Group membership in the parent, then the group itself
        match (&existing_group, &group_id) {
            (ExistingGroup::Absent, Some(group_id)) => {
                let outcome = self.splice_into_parent(&mut text, &scan, group_id);
                outcomes.push((InsertionPoint::ParentGroupChildren, outcome));

                let block = fragments::group_definition(group_id, &self.plan.group, &entries);
                let outcome = insert_before_literal(
                    &mut text,
                    GROUP_END,
                    &block,
                    &format!("\t{GROUP_END}"),
                    1,
                );
                outcomes.push((InsertionPoint::GroupSection, outcome));
            }
            (ExistingGroup::Absent, None) => {
                outcomes.push((
                    InsertionPoint::ParentGroupChildren,
                    InsertionOutcome::AlreadyPresent,
                ));
                outcomes.push((InsertionPoint::GroupSection, InsertionOutcome::AlreadyPresent));
            }
            (ExistingGroup::Present(existing_id), _) => {
                outcomes.push((
                    InsertionPoint::ParentGroupChildren,
                    InsertionOutcome::AlreadyPresent,
                ));
                let outcome = if entries.is_empty() {
                    InsertionOutcome::AlreadyPresent
                } else {
                    self.extend_group(&mut text, existing_id, &entries)
                };
                outcomes.push((InsertionPoint::GroupSection, outcome));
            }
            (ExistingGroup::Ambiguous(count), _) => {
                outcomes.push((
                    InsertionPoint::ParentGroupChildren,
                    InsertionOutcome::AlreadyPresent,
                ));
                let outcome = if entries.is_empty() {
                    InsertionOutcome::AlreadyPresent
                } else {
                    InsertionOutcome::AnchorMissing {
                        anchor: format!(
                            "{} (ambiguous: {count} groups)",
                            self.plan.group.name
                        ),
                    }
                };
                outcomes.push((InsertionPoint::GroupSection, outcome));
            }
        }

        // 5. Sources build phase
        let outcome = if entries.is_empty() {
            InsertionOutcome::AlreadyPresent
        } else {
            self.splice_into_sources_phase(&mut text, &scan, &entries)
        };
        outcomes.push((InsertionPoint::SourcesBuildPhase, outcome));

        for (point, outcome) in &outcomes {
            match outcome {
                InsertionOutcome::Applied { entries } => {
                    info!(section = %point, entries, "Inserted")
                }
                InsertionOutcome::AnchorMissing { anchor } => {
                    warn!(section = %point, anchor = %anchor, "Anchor not found, section left unchanged")
                }
                InsertionOutcome::AlreadyPresent => {
                    debug!(section = %point, "Nothing to insert")
                }
            }
        }

        Ok(PatchOutput {
            text,
            ids: GeneratedIds {
                files: file_ids,
                group: group_id,
            },
            outcomes,
            skipped_files,
        })
    }

    // -------------------------------------------------------------------------
    // Planning
    // -------------------------------------------------------------------------

    fn pending_files(&self, scan: &ManifestScan<'_>) -> (Vec<&'p SourceFile>, Vec<String>) {
        if self.plan.duplicates == DuplicatePolicy::Append {
            return (self.plan.files.iter().collect(), Vec::new());
        }

        let known = scan.file_reference_paths();
        let (skipped, pending): (Vec<&SourceFile>, Vec<&SourceFile>) = self
            .plan
            .files
            .iter()
            .partition(|f| known.iter().any(|path| path == &f.name));

        for file in &skipped {
            info!(file = %file.name, "Already referenced, skipping");
        }
        (pending, skipped.into_iter().map(|f| f.name.clone()).collect())
    }

    fn existing_group(&self, scan: &ManifestScan<'_>) -> ExistingGroup {
        if self.plan.duplicates == DuplicatePolicy::Append {
            return ExistingGroup::Absent;
        }
        match scan.find_object(Some(GROUP_SECTION), &self.plan.group.name) {
            ObjectLookup::Found(id) => ExistingGroup::Present(id),
            ObjectLookup::Ambiguous(n) => ExistingGroup::Ambiguous(n),
            ObjectLookup::NotFound => ExistingGroup::Absent,
        }
    }

    // -------------------------------------------------------------------------
    // Insertions
    // -------------------------------------------------------------------------

    fn splice_into_parent(
        &self,
        text: &mut String,
        scan: &ManifestScan<'_>,
        group_id: &ObjectId,
    ) -> InsertionOutcome {
        let parent = match resolve(scan, Some(GROUP_SECTION), &self.plan.parent_group) {
            Ok(id) => id,
            Err(anchor) => return InsertionOutcome::AnchorMissing { anchor },
        };
        let sibling = match resolve(scan, None, &self.plan.sibling) {
            Ok(id) => id,
            Err(anchor) => return InsertionOutcome::AnchorMissing { anchor },
        };

        let pattern = format!(
            r"(?s)({parent} /\* {parent_name} \*/ = \{{[^}}]*?children = \([^}}]*?)({sibling} /\* {sibling_name} \*/,)",
            parent = parent,
            parent_name = regex::escape(&self.plan.parent_group.name),
            sibling = sibling,
            sibling_name = regex::escape(&self.plan.sibling.name),
        );
        let reference = fragments::group_reference(group_id, &self.plan.group);

        let spliced = splice(text, &pattern, |head, tail| {
            let indent = trailing_indent(head);
            format!("{head}{reference}{indent}{tail}")
        });

        if spliced {
            InsertionOutcome::Applied { entries: 1 }
        } else {
            InsertionOutcome::AnchorMissing {
                anchor: format!(
                    "{sibling} /* {} */ in children of {parent} /* {} */",
                    self.plan.sibling.name, self.plan.parent_group.name
                ),
            }
        }
    }

    fn extend_group(
        &self,
        text: &mut String,
        group_id: &ObjectId,
        entries: &[FileEntry<'_>],
    ) -> InsertionOutcome {
        let pattern = format!(
            r"(?s)({group_id} /\* {name} \*/ = \{{[^}}]*?children = \([^}}]*?\n)([ \t]*\);)",
            name = regex::escape(&self.plan.group.name),
        );
        let children = fragments::group_children(entries);
        if splice(text, &pattern, |head, tail| format!("{head}{children}{tail}")) {
            InsertionOutcome::Applied {
                entries: entries.len(),
            }
        } else {
            InsertionOutcome::AnchorMissing {
                anchor: format!("children of {group_id} /* {} */", self.plan.group.name),
            }
        }
    }

    fn splice_into_sources_phase(
        &self,
        text: &mut String,
        scan: &ManifestScan<'_>,
        entries: &[FileEntry<'_>],
    ) -> InsertionOutcome {
        let phase = match resolve(scan, Some(SOURCES_PHASE_SECTION), &self.plan.sources_phase) {
            Ok(id) => id,
            Err(anchor) => return InsertionOutcome::AnchorMissing { anchor },
        };

        // New entries open the list, ahead of the files already compiled.
        let pattern = format!(
            r"(?s)({phase} /\* {name} \*/ = \{{[^}}]*?files = \([ \t]*\n)([^}}]*?\);\s+runOnlyForDeploymentPostprocessing = 0;)",
            name = regex::escape(&self.plan.sources_phase.name),
        );
        let lines = fragments::sources_phase_entries(entries);
        if splice(text, &pattern, |head, tail| format!("{head}{lines}{tail}")) {
            InsertionOutcome::Applied {
                entries: entries.len(),
            }
        } else {
            InsertionOutcome::AnchorMissing {
                anchor: format!(
                    "files of {phase} /* {} */",
                    self.plan.sources_phase.name
                ),
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// Resolve an anchor to an id. On failure, returns the anchor description.
fn resolve(
    scan: &ManifestScan<'_>,
    section: Option<&str>,
    anchor: &ObjectRef,
) -> Result<ObjectId, String> {
    if let Some(id) = &anchor.id {
        return Ok(id.clone());
    }
    match scan.find_object(section, &anchor.name) {
        ObjectLookup::Found(id) => {
            debug!(name = %anchor.name, id = %id, "Resolved anchor by name");
            Ok(id)
        }
        ObjectLookup::NotFound => Err(format!("{} (no object with this name)", anchor.name)),
        ObjectLookup::Ambiguous(n) => Err(format!("{} (ambiguous: {n} objects)", anchor.name)),
    }
}

/// Insert `fragment` before the first occurrence of `anchor`, writing
/// `replacement_anchor` in its place.
fn insert_before_literal(
    text: &mut String,
    anchor: &str,
    fragment: &str,
    replacement_anchor: &str,
    entries: usize,
) -> InsertionOutcome {
    match text.find(anchor) {
        Some(pos) => {
            text.replace_range(pos..pos + anchor.len(), &format!("{fragment}{replacement_anchor}"));
            InsertionOutcome::Applied { entries }
        }
        None => InsertionOutcome::AnchorMissing {
            anchor: anchor.to_string(),
        },
    }
}

/// Replace the first match of a two-group `pattern`, building the
/// replacement from the two captured groups. Returns whether it matched.
fn splice<F>(text: &mut String, pattern: &str, build: F) -> bool
where
    F: FnOnce(&str, &str) -> String,
{
    let Ok(re) = Regex::new(pattern) else {
        warn!(pattern, "Anchor pattern failed to compile");
        return false;
    };
    let Some(caps) = re.captures(text) else {
        return false;
    };
    let (Some(whole), Some(head), Some(tail)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return false;
    };
    let replacement = build(head.as_str(), tail.as_str());
    let range = whole.range();
    text.replace_range(range, &replacement);
    true
}

/// Whitespace between the last newline of `head` and its end, i.e. the
/// indentation of the entry that follows. Falls back to four tabs.
fn trailing_indent(head: &str) -> &str {
    let last_line = head.rsplit('\n').next().unwrap_or_default();
    if !last_line.is_empty() && last_line.chars().all(|c| c == ' ' || c == '\t') {
        last_line
    } else {
        DEFAULT_CHILD_INDENT
    }
}
