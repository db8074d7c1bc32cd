use ax_snapshot::ax::attr_model::{
    AX_ENABLED, AX_FOCUSED, AX_HIDDEN, AX_MARKED_TEXT_RANGE, AX_NUMBER_OF_CHARACTERS,
    AX_PLACEHOLDER_VALUE, AX_POSITION, AX_ROLE, AX_SELECTED, AX_SELECTED_TEXT,
    AX_SELECTED_TEXT_RANGE, AX_VISIBLE, Point, Rect, TextRange,
};
use ax_snapshot::ax::fixture::ElementSpec;
use ax_snapshot::error::AxError;
use ax_snapshot::identity::hasher::element_id;
use ax_snapshot::identity::path::IdentityScheme;
use ax_snapshot::snapshot::orchestrator::snapshot_hierarchy;
use ax_snapshot::snapshot::snapshot_model::{SnapshotDocument, SnapshotFilter, SnapshotNode};
use ax_snapshot::snapshot::traversal::snapshot_node;
use serde_json::Value;

mod common;
use crate::common::utils::{desktop, main_window, single_window, untrusted_desktop};

fn snapshot(filter: Option<&SnapshotFilter>) -> SnapshotDocument {
    snapshot_hierarchy(&desktop(), filter, IdentityScheme::Attributes).unwrap()
}

fn all_paths(node: &SnapshotNode, out: &mut Vec<String>) {
    out.push(node.path.clone());
    for child in node.children() {
        all_paths(child, out);
    }
}

// =========================================================================
// Orchestrator: application / window selection
// =========================================================================

#[test]
fn default_snapshot_visits_frontmost_main_window_only() {
    let doc = snapshot(None);

    assert_eq!(doc.windows.len(), 1, "inspector is not a main window");
    let window = &doc.windows[0];
    assert_eq!(window.application_name, "TextEdit");
    assert!(window.application_is_active);
    assert!(window.is_main);
    assert_eq!(window.node.path, "AXWindow -> Untitled");
    assert_eq!(window.node.id, element_id("AXWindow -> Untitled"));
    assert_eq!(window.node.depth, 0);
}

#[test]
fn application_filter_excludes_other_apps_even_if_frontmost() {
    let doc = snapshot(Some(&SnapshotFilter::default().application("finder")));

    assert_eq!(doc.windows.len(), 1);
    assert_eq!(doc.windows[0].application_name, "Finder");
    assert!(!doc.windows[0].application_is_active);

    let doc = snapshot(Some(&SnapshotFilter::default().application("TextEdit")));
    assert!(doc.windows.iter().all(|w| w.application_name == "TextEdit"));
}

#[test]
fn window_title_filter_is_case_insensitive_exact_match() {
    let filter = SnapshotFilter::default().application("TextEdit").window("UNTITLED");
    assert_eq!(snapshot(Some(&filter)).windows.len(), 1);

    let partial = SnapshotFilter::default().application("TextEdit").window("Untit");
    assert!(snapshot(Some(&partial)).windows.is_empty(), "no substring matching");

    let not_main = SnapshotFilter::default().application("TextEdit").window("Inspector");
    assert!(snapshot(Some(&not_main)).windows.is_empty(), "only main windows are snapshotted");
}

#[test]
fn unknown_application_yields_empty_document() {
    let doc = snapshot(Some(&SnapshotFilter::default().application("Mail")));
    assert!(doc.windows.is_empty());
}

#[test]
fn permission_denied_short_circuits() {
    let result = snapshot_hierarchy(&untrusted_desktop(), None, IdentityScheme::Attributes);
    assert!(matches!(result, Err(AxError::PermissionDenied)));
}

// =========================================================================
// Tree snapshotter: projection
// =========================================================================

#[test]
fn text_area_projects_attributes_selection_and_actions() {
    let doc = snapshot(None);
    let text_area = &doc.windows[0].node.children()[0];

    assert_eq!(text_area.role, "AXTextArea");
    assert_eq!(text_area.depth, 1);
    assert_eq!(text_area.path, "AXWindow -> Untitled -> AXTextArea");
    assert_eq!(text_area.frame.x, 10.0);
    assert_eq!(text_area.frame.height, 500.0);
    assert_eq!(text_area.attribute("AXValue"), Some("draft"));
    assert_eq!(text_area.attribute("AXRole"), Some("AXTextArea"));
    assert_eq!(text_area.attribute("AXSelectedTextRange"), Some("loc=2 len=3"));
    assert_eq!(
        text_area.attribute("AXSelectedTextBounds"),
        Some("12.50,44.00,30.25,16.00")
    );
    assert_eq!(
        text_area.selected_text_bounds(),
        Some(Rect { x: 12.5, y: 44.0, width: 30.25, height: 16.0 })
    );
    assert_eq!(text_area.actions.as_deref(), Some(&["AXPress".to_string()][..]));
    assert!(text_area.children.is_none());
}

#[test]
fn empty_selection_has_no_bounds() {
    let backend = single_window(
        main_window("Doc").child(
            ElementSpec::new("AXTextField")
                .attr(AX_SELECTED_TEXT_RANGE, TextRange { location: 4, length: 0 })
                .with_text_bounds(Rect { x: 1.0, y: 1.0, width: 1.0, height: 1.0 }),
        ),
    );
    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let field = &doc.windows[0].node.children()[0];

    assert_eq!(field.attribute("AXSelectedTextRange"), Some("loc=4 len=0"));
    assert_eq!(field.attribute("AXSelectedTextBounds"), None);
}

#[test]
fn selection_attributes_only_for_text_input_roles() {
    let backend = single_window(
        main_window("Doc").child(
            ElementSpec::new("AXStaticText")
                .attr(AX_SELECTED_TEXT_RANGE, TextRange { location: 0, length: 2 })
                .with_text_bounds(Rect { x: 1.0, y: 1.0, width: 1.0, height: 1.0 }),
        ),
    );
    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let text = &doc.windows[0].node.children()[0];

    assert_eq!(text.attribute("AXSelectedTextRange"), None);
    assert_eq!(text.attribute("AXSelectedTextBounds"), None);
}

#[test]
fn text_field_records_input_extras_and_flags() {
    let search_field = ElementSpec::new("AXTextField")
        .attr(AX_SELECTED_TEXT, "ab")
        .attr(AX_MARKED_TEXT_RANGE, TextRange { location: 1, length: 0 })
        .attr(AX_NUMBER_OF_CHARACTERS, 5.0)
        .attr(AX_PLACEHOLDER_VALUE, "Search")
        .attr(AX_ENABLED, true)
        .attr(AX_FOCUSED, false)
        .attr(AX_SELECTED, true);
    let label = ElementSpec::new("AXStaticText")
        .attr(AX_PLACEHOLDER_VALUE, "Search")
        .attr(AX_NUMBER_OF_CHARACTERS, 5.0);
    let backend = single_window(main_window("Doc").child(search_field).child(label));

    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let children = doc.windows[0].node.children();

    let field = &children[0];
    assert_eq!(field.attribute("AXSelectedText"), Some("ab"));
    assert_eq!(field.attribute("AXMarkedTextRange"), Some("loc=1 len=0"));
    assert_eq!(field.attribute("AXNumberOfCharacters"), Some("5"));
    assert_eq!(field.attribute("AXPlaceholderValue"), Some("Search"));
    assert_eq!(field.attribute("AXEnabled"), Some("true"));
    assert_eq!(field.attribute("AXFocused"), Some("false"));
    assert_eq!(field.attribute("AXSelected"), Some("true"));

    let label = &children[1];
    assert_eq!(label.attribute("AXPlaceholderValue"), None);
    assert_eq!(label.attribute("AXNumberOfCharacters"), None);
}

#[test]
fn frame_defaults_to_zero_without_geometry() {
    let doc = snapshot(Some(&SnapshotFilter::default().application("Finder")));
    let back = &doc.windows[0].node.children()[0];

    assert_eq!(back.frame.x, 0.0);
    assert_eq!(back.frame.y, 0.0);
    assert_eq!(back.frame.width, 0.0);
    assert_eq!(back.frame.height, 0.0);
}

#[test]
fn node_with_empty_attributes_keeps_core_fields() {
    let backend = single_window(main_window("Doc").child(ElementSpec::new("")));
    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let json: Value = serde_json::to_value(&doc).unwrap();
    let child = &json["e"][0]["c"][0];

    for key in ["id", "e", "p", "d", "f"] {
        assert!(child.get(key).is_some(), "missing key {}", key);
    }
    assert!(child.get("a").is_none(), "empty attribute map must be omitted");
    assert!(child.get("m").is_none());
    assert!(child.get("c").is_none());
    assert_eq!(child["p"], "AXWindow -> Doc -> ");
}

#[test]
fn node_without_role_is_dropped_with_its_subtree() {
    let backend = single_window(
        main_window("Doc").child(ElementSpec::bare().child(ElementSpec::new("AXButton").title("Inner"))),
    );
    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    assert!(doc.windows[0].node.children.is_none());
}

// =========================================================================
// Tree snapshotter: visibility pruning
// =========================================================================

#[test]
fn zero_sized_node_prunes_visible_descendants() {
    let doc = snapshot(None);
    let mut paths = vec![];
    all_paths(&doc.windows[0].node, &mut paths);

    assert!(!paths.iter().any(|p| p.contains("Collapsed")));
    assert!(!paths.iter().any(|p| p.contains("Hidden")), "descendant of pruned node leaked");
    assert_eq!(doc.windows[0].node.children().len(), 2);
}

#[test]
fn visibility_indicators_each_prune() {
    let backend = single_window(
        main_window("Doc")
            .child(ElementSpec::new("AXButton").title("hidden").attr(AX_HIDDEN, true))
            .child(
                ElementSpec::new("AXButton")
                    .title("offscreen")
                    .attr(AX_POSITION, Point { x: 5.0, y: -20000.0 }),
            )
            .child(ElementSpec::new("AXButton").title("not shown").attr(AX_VISIBLE, false))
            .child(
                ElementSpec::new("AXButton")
                    .title("edge")
                    .attr(AX_POSITION, Point { x: -10000.0, y: 0.0 }),
            )
            .child(ElementSpec::new("AXButton").title("plain")),
    );
    let doc = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let titles: Vec<&str> = doc.windows[0]
        .node
        .children()
        .iter()
        .filter_map(|c| c.attribute("AXTitle"))
        .collect();

    assert_eq!(titles, vec!["edge", "plain"]);
}

#[test]
fn invisible_root_returns_nothing() {
    let backend = single_window(main_window("Doc").frame(0.0, 0.0, 100.0, 0.0));
    let window = backend.find_by_attribute(AX_ROLE, "AXWindow").unwrap();
    assert!(snapshot_node(&backend, &window, 0, "").is_none());
}

// =========================================================================
// Idempotence and wire format
// =========================================================================

#[test]
fn repeated_snapshots_issue_identical_ids() {
    let backend = desktop();
    let first = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();
    let second = snapshot_hierarchy(&backend, None, IdentityScheme::Attributes).unwrap();

    assert_eq!(first.windows, second.windows);
}

#[test]
fn wire_document_uses_short_field_names() {
    let json: Value = serde_json::to_value(snapshot(None)).unwrap();

    assert!(json["ts"].is_string());
    let window = &json["e"][0];
    assert_eq!(window["e"], "AXWindow");
    assert_eq!(window["main"], true);
    assert_eq!(window["app"], "TextEdit");
    assert_eq!(window["appActive"], true);
    assert_eq!(window["f"], serde_json::json!([0.0, 0.0, 800.0, 600.0]));
    assert_eq!(window["d"], 0);
    assert!(window["c"].is_array());

    let text = serde_json::to_string(&json).unwrap();
    assert!(!text.contains("null"), "absent fields must be omitted, not null");
}

#[test]
fn wire_document_parses_back() {
    let doc = snapshot(None);
    let text = serde_json::to_string(&doc).unwrap();
    let parsed: SnapshotDocument = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, doc);
    assert_eq!(parsed.node_count(), 3);
}
