pub mod plan;
pub mod report;

pub use plan::{
    DEFAULT_FILES, DEFAULT_GROUP_NAME, DEFAULT_PARENT_GROUP, DEFAULT_PARENT_GROUP_ID,
    DEFAULT_SIBLING, DEFAULT_SIBLING_ID, DEFAULT_SOURCES_PHASE, DEFAULT_SOURCES_PHASE_ID,
    DuplicatePolicy, GroupSpec, ObjectRef, PatchPlan, PatchPlanBuilder, SourceFile,
};
pub use report::{
    FileIds, GeneratedIds, InsertionOutcome, InsertionPoint, PatchReport,
};
