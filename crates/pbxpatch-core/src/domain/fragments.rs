//! Text fragments inserted into the manifest.
//!
//! Each function renders one block by concatenation over the files in plan
//! order. Indentation uses tabs, matching what Xcode writes.

use crate::domain::entities::{FileIds, GroupSpec, SourceFile};
use crate::domain::value_objects::ObjectId;

/// A file paired with the identifiers generated for it.
pub type FileEntry<'a> = (&'a SourceFile, &'a FileIds);

/// `PBXBuildFile` records, preceded by a blank line.
pub fn build_file_entries(files: &[FileEntry<'_>]) -> String {
    let mut out = String::from("\n");
    for (file, ids) in files {
        out.push_str(&format!(
            "\t\t{bf} /* {name} in Sources */ = {{isa = PBXBuildFile; fileRef = {fr} /* {name} */; }};\n",
            bf = ids.build_file,
            fr = ids.file_ref,
            name = file.name,
        ));
    }
    out
}

/// `PBXFileReference` records, preceded by a blank line.
pub fn file_reference_entries(files: &[FileEntry<'_>]) -> String {
    let mut out = String::from("\n");
    for (file, ids) in files {
        out.push_str(&format!(
            "\t\t{fr} /* {name} */ = {{isa = PBXFileReference; lastKnownFileType = {kind}; path = {name}; sourceTree = \"<group>\"; }};\n",
            fr = ids.file_ref,
            kind = file.file_type,
            name = file.name,
        ));
    }
    out
}

/// Child reference lines, as they appear inside a `children = ( … );` list.
pub fn group_children(files: &[FileEntry<'_>]) -> String {
    files
        .iter()
        .map(|(file, ids)| format!("\t\t\t\t{} /* {} */,\n", ids.file_ref, file.name))
        .collect()
}

/// A complete `PBXGroup` object definition.
pub fn group_definition(group_id: &ObjectId, group: &GroupSpec, files: &[FileEntry<'_>]) -> String {
    let mut out = format!(
        "\t\t{group_id} /* {name} */ = {{\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n",
        name = group.name,
    );
    out.push_str(&group_children(files));
    out.push_str(&format!(
        "\t\t\t);\n\t\t\tpath = {path};\n\t\t\tsourceTree = \"<group>\";\n\t\t}};\n",
        path = group.path,
    ));
    out
}

/// Reference to the new group inside its parent's children list.
pub fn group_reference(group_id: &ObjectId, group: &GroupSpec) -> String {
    format!("{group_id} /* {} */,\n", group.name)
}

/// Build-file lines inside a build phase's `files = ( … );` list.
pub fn sources_phase_entries(files: &[FileEntry<'_>]) -> String {
    files
        .iter()
        .map(|(file, ids)| {
            format!(
                "\t\t\t\t{} /* {} in Sources */,\n",
                ids.build_file, file.name
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ObjectId {
        ObjectId::parse(format!("{n:024X}")).unwrap()
    }

    fn fixture() -> (SourceFile, FileIds) {
        (
            SourceFile::new("GameView.swift"),
            FileIds {
                name: "GameView.swift".into(),
                file_ref: id(1),
                build_file: id(2),
            },
        )
    }

    #[test]
    fn build_file_line_format() {
        let (file, ids) = fixture();
        let text = build_file_entries(&[(&file, &ids)]);
        assert_eq!(
            text,
            "\n\t\t000000000000000000000002 /* GameView.swift in Sources */ = {isa = PBXBuildFile; fileRef = 000000000000000000000001 /* GameView.swift */; };\n"
        );
    }

    #[test]
    fn file_reference_line_format() {
        let (file, ids) = fixture();
        let text = file_reference_entries(&[(&file, &ids)]);
        assert_eq!(
            text,
            "\n\t\t000000000000000000000001 /* GameView.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = GameView.swift; sourceTree = \"<group>\"; };\n"
        );
    }

    #[test]
    fn group_definition_lists_children_in_order() {
        let (file, ids) = fixture();
        let other = SourceFile::new("Board.swift");
        let other_ids = FileIds {
            name: "Board.swift".into(),
            file_ref: id(3),
            build_file: id(4),
        };
        let text = group_definition(
            &id(9),
            &GroupSpec::new("SwiftUI"),
            &[(&file, &ids), (&other, &other_ids)],
        );
        assert_eq!(
            text,
            "\t\t000000000000000000000009 /* SwiftUI */ = {\n\
             \t\t\tisa = PBXGroup;\n\
             \t\t\tchildren = (\n\
             \t\t\t\t000000000000000000000001 /* GameView.swift */,\n\
             \t\t\t\t000000000000000000000003 /* Board.swift */,\n\
             \t\t\t);\n\
             \t\t\tpath = SwiftUI;\n\
             \t\t\tsourceTree = \"<group>\";\n\
             \t\t};\n"
        );
    }

    #[test]
    fn sources_phase_line_format() {
        let (file, ids) = fixture();
        assert_eq!(
            sources_phase_entries(&[(&file, &ids)]),
            "\t\t\t\t000000000000000000000002 /* GameView.swift in Sources */,\n"
        );
    }
}
