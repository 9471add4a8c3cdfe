use super::*;

fn font(family: &str) -> FontSpec {
    FontSpec {
        family: family.into(),
        size_px: 24.0,
        bold: false,
        italic: false,
    }
}

#[test]
fn empty_database_fails_only_when_text_must_be_drawn() {
    let mut engine = TextEngine::from_font_data(Vec::new());
    assert_eq!(engine.face_count(), 0);

    assert_eq!(engine.line_width(&font("Arial"), "").unwrap(), 0.0);
    assert!(engine.shape_line(&font("Arial"), "").unwrap().runs.is_empty());

    let err = engine.line_width(&font("Arial"), "Hello").unwrap_err();
    assert!(matches!(err, SlideError::PreconditionFailed(_)));
    assert!(err.to_string().contains("24px Arial"));
}

#[test]
fn invalid_font_size_is_rejected() {
    let mut engine = TextEngine::from_font_data(Vec::new());
    let mut f = font("Arial");
    f.size_px = 0.0;
    assert!(matches!(
        engine.shape_line(&f, "x"),
        Err(SlideError::Validation(_))
    ));
}

#[test]
fn generic_families_map_to_fontdb_generics() {
    assert_eq!(family_for("serif"), fontdb::Family::Serif);
    assert_eq!(family_for(" Monospace "), fontdb::Family::Monospace);
    assert_eq!(family_for("Georgia"), fontdb::Family::Name("Georgia"));
}

#[test]
fn missing_font_dir_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let opts = TextEngineOpts {
        load_system_fonts: false,
        font_dirs: vec![dir.path().join("nope"), dir.path().to_path_buf()],
    };
    let engine = TextEngine::new(&opts);
    assert_eq!(engine.face_count(), 0);
}

fn test_font(name: &str) -> Vec<u8> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fonts")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn dejavu_engine() -> (TextEngine, Vec<u8>, Vec<u8>) {
    let regular = test_font("DejaVuSans.ttf");
    let bold = test_font("DejaVuSans-Bold.ttf");
    let engine = TextEngine::from_font_data([regular.clone(), bold.clone()]);
    (engine, regular, bold)
}

#[test]
fn real_font_measures_and_bold_is_wider() {
    let (mut engine, _, _) = dejavu_engine();
    assert_eq!(engine.face_count(), 2);

    let mut regular = font("DejaVu Sans");
    regular.size_px = 40.0;
    let mut bold = regular.clone();
    bold.bold = true;

    let w_regular = engine.line_width(&regular, "Hello").unwrap();
    let w_bold = engine.line_width(&bold, "Hello").unwrap();
    assert!(w_regular > 0.0);
    assert!(w_bold > w_regular, "bold {w_bold} <= regular {w_regular}");

    let doubled = {
        let mut f = regular.clone();
        f.size_px = 80.0;
        engine.line_width(&f, "Hello").unwrap()
    };
    assert!((doubled - 2.0 * w_regular).abs() < 2.0);
}

#[test]
fn shaped_runs_use_the_face_they_were_shaped_with() {
    let (mut engine, regular_bytes, bold_bytes) = dejavu_engine();
    let mut f = font("DejaVu Sans");

    for (bold, bytes) in [(false, &regular_bytes), (true, &bold_bytes)] {
        f.bold = bold;
        let shaped = engine.shape_line(&f, "Hi there").unwrap();
        assert!(!shaped.runs.is_empty());
        assert!((shaped.width - engine.line_width(&f, "Hi there").unwrap()).abs() < 1e-6);

        for run in &shaped.runs {
            assert_eq!(run.font.data.data(), bytes.as_slice(), "bold={bold}");
            assert_eq!(run.font_size, 24.0);
            assert!(run.glyphs.iter().all(|g| g.id != 0));
            // Baselines sit below the line top.
            assert!(run.glyphs.iter().all(|g| g.y > 0.0));
        }
    }
}

#[test]
fn unknown_family_falls_back_to_an_available_face() {
    let (mut engine, _, _) = dejavu_engine();
    assert!(engine.line_width(&font("No Such Family"), "Hello").unwrap() > 0.0);
}
