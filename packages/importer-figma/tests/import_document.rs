use screenspec_importer_figma::{convert_file, list_frames, FigmaFile};
use screenspec_schema::{NodeKind, ScreenSpec};

// A trimmed landing-page document: two top-level frames on the first page,
// mixing auto-layout, name heuristics, text runs and fills.
const DOCUMENT: &str = r#"{
    "name": "Landing",
    "document": {
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [
            { "id": "0:1", "name": "Page 1", "type": "CANVAS", "children": [
                { "id": "1:1", "name": "Hero", "type": "FRAME",
                  "layoutMode": "VERTICAL", "itemSpacing": 24,
                  "children": [
                      { "id": "1:2", "name": "Title", "type": "TEXT",
                        "characters": "Build faster", "style": { "fontSize": 36 } },
                      { "id": "1:3", "name": "Subtitle", "type": "TEXT",
                        "characters": "Ship screens, not glue code", "style": { "fontSize": 16 } },
                      { "id": "1:4", "name": "CTA Button", "type": "FRAME",
                        "layoutMode": "HORIZONTAL", "itemSpacing": 4,
                        "children": [
                            { "id": "1:5", "name": "Label", "type": "TEXT",
                              "characters": "Get started", "style": { "fontSize": 14 } }
                        ] },
                      { "id": "1:6", "name": "Screenshot", "type": "RECTANGLE",
                        "fills": [ { "type": "IMAGE", "imageRef": "img0" } ] }
                  ] },
                { "id": "2:1", "name": "Footer", "type": "FRAME",
                  "children": [
                      { "id": "2:2", "name": "Rule", "type": "LINE" },
                      { "id": "2:3", "name": "Copyright", "type": "TEXT",
                        "characters": "(c) 2026", "style": { "fontSize": 12 } }
                  ] }
            ] }
        ]
    }
}"#;

fn document() -> FigmaFile {
    serde_json::from_str(DOCUMENT).unwrap()
}

#[test]
fn test_unscoped_import_wraps_both_frames() {
    let file = document();
    let spec = convert_file(&file, None).unwrap();

    let root = &spec.tree;
    assert_eq!(root.id, "root");
    assert_eq!(root.kind, NodeKind::Stack);
    assert_eq!(root.children.len(), 2);

    let hero = &root.children[0];
    assert_eq!(hero.kind, NodeKind::Stack);
    assert_eq!(hero.prop_str("direction"), Some("column"));
    assert_eq!(hero.prop_str("gap"), Some("6"));

    assert_eq!(hero.children[0].kind, NodeKind::Heading);
    assert_eq!(hero.children[0].prop_str("text"), Some("Build faster"));
    assert_eq!(hero.children[1].kind, NodeKind::Text);
    // Name heuristic beats the horizontal auto layout.
    assert_eq!(hero.children[2].kind, NodeKind::Button);
    assert_eq!(hero.children[2].prop_str("label"), Some("Get started"));
    assert_eq!(hero.children[3].kind, NodeKind::Image);
    assert_eq!(hero.children[3].prop_str("src"), Some(""));

    let footer = &root.children[1];
    assert_eq!(footer.kind, NodeKind::Section);
    assert_eq!(footer.children[0].kind, NodeKind::Divider);
    assert_eq!(footer.children[1].kind, NodeKind::Text);
}

#[test]
fn test_targeted_import_slugifies_route() {
    let file = document();
    let spec = convert_file(&file, Some("1:1")).unwrap();

    assert_eq!(spec.route, "/hero");
    assert_eq!(spec.tree.id, "root");
    assert_eq!(spec.tree.kind, NodeKind::Stack);
    assert_eq!(spec.tree.children.len(), 4);
}

#[test]
fn test_imported_spec_round_trips_and_validates() {
    let file = document();
    let spec = convert_file(&file, None).unwrap();

    let parsed = ScreenSpec::from_json_str(&spec.to_json_string()).unwrap();
    assert_eq!(spec, parsed);
    assert!(spec.validate().is_empty());
}

#[test]
fn test_frame_listing_matches_page() {
    let file = document();
    let frames = list_frames(&file.document);

    let names: Vec<&str> = frames.iter().map(|frame| frame.name.as_str()).collect();
    assert_eq!(names, vec!["Hero", "Footer"]);
    assert!(frames.iter().all(|frame| frame.page == "Page 1"));
}
