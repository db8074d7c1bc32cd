use ax_snapshot::ax::attr_model::{AX_DESCRIPTION, AX_HELP, AX_ROLE, AX_SUBROLE, AX_TITLE, Point};
use ax_snapshot::ax::fixture::ElementSpec;
use ax_snapshot::identity::hasher::element_id;
use ax_snapshot::identity::path::{
    IdentityScheme, PathContext, build_path, build_path_in, join_path, own_segment,
};

mod common;
use crate::common::utils::{desktop, main_window, single_window};

// =========================================================================
// Identity hasher
// =========================================================================

#[test]
fn element_id_is_deterministic() {
    let path = "AXWindow -> Untitled -> AXTextArea";
    let first = element_id(path);
    for _ in 0..100 {
        assert_eq!(element_id(path), first);
    }
    assert_eq!(first.len(), 8);
}

#[test]
fn element_id_separates_near_duplicate_paths() {
    let paths = [
        "AXWindow -> Untitled -> AXButton -> Save",
        "AXWindow -> Untitled -> AXButton -> Save ",
        "AXWindow -> Untitled -> AXButton -> save",
        "AXWindow -> Untitled -> AXButton -> Savf",
        "AXWindow -> Untitled 2 -> AXButton -> Save",
        "AXWindow -> Untitled -> AXButton",
        "AXWindow -> Untitled",
        "",
    ];
    let ids: Vec<String> = paths.iter().map(|p| element_id(p)).collect();
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            assert_ne!(ids[i], ids[j], "{:?} vs {:?}", paths[i], paths[j]);
        }
    }
}

// =========================================================================
// Path builder
// =========================================================================

#[test]
fn join_path_omits_separator_for_roots() {
    assert_eq!(join_path("", "AXWindow"), "AXWindow");
    assert_eq!(join_path("AXWindow", "AXButton"), "AXWindow -> AXButton");
    assert_eq!(join_path("AXWindow", ""), "AXWindow -> ", "empty segment is still appended");
}

#[test]
fn segment_follows_fixed_attribute_order_and_drops_empties() {
    let backend = single_window(
        main_window("Doc").child(
            ElementSpec::new("AXButton")
                .attr(AX_SUBROLE, "AXCloseButton")
                .attr(AX_HELP, "")
                .attr(AX_DESCRIPTION, "close")
                .attr("AXRoleDescription", "button")
                .title("X")
                .attr("AXValue", "ignored in paths"),
        ),
    );
    let node = backend.find_by_attribute(AX_SUBROLE, "AXCloseButton").unwrap();

    assert_eq!(
        own_segment(&backend, &node),
        "AXButton -> button -> X -> close -> AXCloseButton"
    );
}

#[test]
fn segment_stringifies_structured_values() {
    let backend = single_window(
        main_window("Doc").child(
            ElementSpec::new("AXStaticText")
                .attr(AX_TITLE, "line one\nline two")
                .attr(AX_DESCRIPTION, Point { x: 3.0, y: 4.5 })
                .attr(AX_HELP, 7.0),
        ),
    );
    let node = backend.find_by_attribute(AX_ROLE, "AXStaticText").unwrap();

    assert_eq!(
        own_segment(&backend, &node),
        "AXStaticText -> line one\\nline two -> (3, 4.5) -> 7"
    );
}

#[test]
fn build_path_prefixes_parent_path() {
    let backend = desktop();
    let window = backend.find_by_attribute(AX_TITLE, "Untitled").unwrap();
    let save = backend.find_by_attribute(AX_TITLE, "Save").unwrap();

    let window_path = build_path(&backend, &window, "");
    assert_eq!(window_path.segment, "AXWindow -> Untitled");
    assert_eq!(window_path.full, "AXWindow -> Untitled");

    let save_path = build_path(&backend, &save, &window_path.full);
    assert_eq!(save_path.segment, "AXButton -> Save");
    assert_eq!(save_path.full, "AXWindow -> Untitled -> AXButton -> Save");
}

#[test]
fn node_without_path_attributes_has_empty_segment() {
    let backend = single_window(main_window("Doc").child(ElementSpec::bare().attr("AXValue", "x")));
    let node = backend.find_by_attribute("AXValue", "x").unwrap();

    let path = build_path(&backend, &node, "AXWindow -> Doc");
    assert_eq!(path.segment, "");
    assert_eq!(path.full, "AXWindow -> Doc -> ");
}

#[test]
fn sibling_indexed_scheme_appends_index() {
    let backend = desktop();
    let save = backend.find_by_attribute(AX_TITLE, "Save").unwrap();

    let default = build_path_in(
        &backend,
        &save,
        PathContext::child("AXWindow -> Untitled", 1, IdentityScheme::Attributes),
    );
    assert_eq!(default.full, "AXWindow -> Untitled -> AXButton -> Save");

    let indexed = build_path_in(
        &backend,
        &save,
        PathContext::child("AXWindow -> Untitled#0", 1, IdentityScheme::SiblingIndexed),
    );
    assert_eq!(indexed.segment, "AXButton -> Save#1");
    assert_eq!(indexed.full, "AXWindow -> Untitled#0 -> AXButton -> Save#1");
}
