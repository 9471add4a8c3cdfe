use super::*;

/// Every char advances by half the font size.
struct HalfEm {
    calls: usize,
}

impl FontMetrics for HalfEm {
    fn line_width(&mut self, font: &FontSpec, line: &str) -> SlideResult<f64> {
        self.calls += 1;
        Ok(line.chars().count() as f64 * font.size_px * 0.5)
    }
}

fn font(size: f64) -> FontSpec {
    FontSpec {
        family: "Arial".into(),
        size_px: size,
        bold: false,
        italic: false,
    }
}

#[test]
fn measures_each_line_and_block() {
    let mut m = HalfEm { calls: 0 };
    let b = measure_block(&mut m, &font(20.0), "Line A\nLonger Line B").unwrap();
    assert_eq!(b.lines, vec!["Line A", "Longer Line B"]);
    assert_eq!(b.line_widths, vec![60.0, 130.0]);
    assert_eq!(b.max_width, 130.0);
    assert_eq!(b.line_height, 24.0);
    assert_eq!(b.block_height, 48.0);
}

#[test]
fn empty_text_is_one_empty_line() {
    let mut m = HalfEm { calls: 0 };
    let b = measure_block(&mut m, &font(10.0), "").unwrap();
    assert_eq!(b.lines, vec![String::new()]);
    assert_eq!(b.line_widths, vec![0.0]);
    assert_eq!(b.max_width, 0.0);
    assert_eq!(b.block_height, 12.0);
    assert_eq!(m.calls, 0);
}

#[test]
fn trailing_newline_adds_empty_line() {
    let mut m = HalfEm { calls: 0 };
    let b = measure_block(&mut m, &font(10.0), "ab\n").unwrap();
    assert_eq!(b.lines.len(), 2);
    assert_eq!(b.line_widths, vec![10.0, 0.0]);
}

#[test]
fn align_offsets_use_block_max_width() {
    assert_eq!(align_offset(Align::Left, 130.0), 0.0);
    assert_eq!(align_offset(Align::Center, 130.0), 65.0);
    assert_eq!(align_offset(Align::Right, 130.0), 130.0);
}

#[test]
fn font_shorthand_orders_italic_before_bold() {
    let f = FontSpec {
        family: "Georgia".into(),
        size_px: 48.0,
        bold: true,
        italic: true,
    };
    assert_eq!(f.to_string(), "italic bold 48px Georgia");
    assert_eq!(font(24.0).to_string(), "24px Arial");
}
