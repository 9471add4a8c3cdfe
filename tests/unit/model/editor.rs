use super::*;
use crate::model::element::Align;

#[test]
fn default_editor_has_two_slides() {
    let ed = EditorState::default();
    assert_eq!(ed.slides.len(), 2);
    assert_eq!(ed.slides[0].id, 1);
    assert_eq!(ed.slides[1].image_src, "assets/slide2.jpg");
    assert_eq!(ed.next_slide_id, 3);
}

#[test]
fn add_and_delete_slides() {
    let mut ed = EditorState::with_images(["a.png"]);
    assert!(ed.delete_slide(0).is_err());

    let id = ed.add_slide("b.png");
    assert_eq!(id, 2);
    assert_eq!(ed.current_slide_index, 1);

    ed.delete_slide(1).unwrap();
    assert_eq!(ed.current_slide_index, 0);
    assert!(matches!(
        ed.delete_slide(0),
        Err(SlideError::PreconditionFailed(_))
    ));
}

#[test]
fn switch_ignores_out_of_range() {
    let mut ed = EditorState::default();
    assert!(ed.switch_to_slide(1));
    assert!(!ed.switch_to_slide(9));
    assert_eq!(ed.current_slide_index, 1);
}

#[test]
fn selection_drives_updates() {
    let mut ed = EditorState::default();
    assert!(!ed.update_selected(TextUpdate::Align(Align::Center)).unwrap());

    let id = ed.add_text().unwrap();
    assert_eq!(ed.selected_text_id(), Some(id.as_str()));
    assert!(ed.update_selected(TextUpdate::Align(Align::Center)).unwrap());
    assert!(ed.place_selected_at_corner(Corner::BottomRight).unwrap());
    assert!(ed.adjust_selected_z_order(-1).unwrap());

    let el = ed.current_slide().unwrap().text_element(&id).unwrap();
    assert_eq!(el.align, Align::Center);
    assert_eq!((el.x, el.y), (98.0, 98.0));
    assert_eq!(el.z_index, 1);

    assert!(ed.delete_selected_text().unwrap().is_some());
    assert!(ed.current_slide().unwrap().text_elements.is_empty());
    assert!(ed.selected_text_id().is_none());
}

#[test]
fn selecting_unknown_id_fails() {
    let mut ed = EditorState::default();
    assert!(ed.select_text(Some("text-99")).is_err());
    ed.select_text(None).unwrap();
}

#[test]
fn switching_slides_clears_selection() {
    let mut ed = EditorState::default();
    ed.add_text().unwrap();
    ed.switch_to_slide(1);
    assert!(ed.selected_text_id().is_none());
}

#[test]
fn persisted_record_round_trips() {
    let mut ed = EditorState::default();
    ed.add_text().unwrap();
    ed.update_selected(TextUpdate::Text("Hello\nWorld".into()))
        .unwrap();
    ed.add_slide("c.png");

    let json = ed.to_json_string().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(v.get("currentSlideIndex").is_some());
    assert!(v.get("nextSlideId").is_some());
    assert!(v.get("selectedTextId").is_none());

    let back = EditorState::from_json_str(&json).unwrap();
    assert_eq!(back.slides, ed.slides);
    assert_eq!(back.current_slide_index, 2);
    assert_eq!(back.next_slide_id, 4);
}

#[test]
fn load_applies_defaults_and_clamps() {
    let back = EditorState::from_json_str(
        r#"{"slides":[{"id":7,"imageSrc":"a.png","textElements":[]}],"currentSlideIndex":5}"#,
    )
    .unwrap();
    assert_eq!(back.current_slide_index, 0);
    assert_eq!(back.next_slide_id, 8);
    assert_eq!(back.slides[0].next_text_id, 1);
}

#[test]
fn empty_documents_are_rejected() {
    assert!(matches!(
        EditorState::from_json_str(r#"{"slides":[]}"#),
        Err(SlideError::Validation(_))
    ));
    assert!(matches!(
        EditorState::from_json_str("not json"),
        Err(SlideError::Serde(_))
    ));
}

#[test]
fn save_and_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    let ed = EditorState::default();
    ed.save(&path).unwrap();
    let back = EditorState::load(&path).unwrap();
    assert_eq!(back.slides, ed.slides);
}

fn doc_with_font_size(size: serde_json::Value) -> String {
    serde_json::json!({
        "slides": [{
            "id": 1,
            "imageSrc": "a.png",
            "textElements": [{
                "id": "text-1", "text": "Hi", "x": 10, "y": 10,
                "fontSize": size, "fontFamily": "Arial", "color": "#000",
                "bold": false, "italic": false, "zIndex": 1
            }]
        }]
    })
    .to_string()
}

#[test]
fn unrenderable_font_sizes_are_rejected_on_load() {
    for size in [serde_json::json!(0), serde_json::json!(-12), serde_json::json!(0.0)] {
        let doc = doc_with_font_size(size.clone());
        assert!(
            matches!(EditorState::from_json_str(&doc), Err(SlideError::Validation(_))),
            "fontSize {size}"
        );
    }

    let ok = EditorState::from_json_str(&doc_with_font_size(serde_json::json!(0.5))).unwrap();
    assert_eq!(ok.slides[0].text_elements[0].font_size, 0.5);
}
