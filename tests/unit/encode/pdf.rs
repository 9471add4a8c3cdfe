use super::*;

const A4: (f64, f64) = (595.28, 841.89);

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn wide_images_fit_the_page_width() {
    let p = fit_to_page(1280, 720, A4.0, A4.1);
    assert!(approx(p.width, 595.28));
    assert!(approx(p.height, 595.28 * 720.0 / 1280.0));
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, ((A4.1 - p.height) / 2.0).round());
}

#[test]
fn tall_images_fit_the_page_height() {
    let p = fit_to_page(800, 1200, A4.0, A4.1);
    assert!(approx(p.height, 841.89));
    assert!(approx(p.width, 841.89 * 800.0 / 1200.0));
    assert_eq!(p.y, 0.0);
    assert_eq!(p.x, 17.0);
}

#[test]
fn page_formats_parse_and_size() {
    assert_eq!("A4".parse::<PageFormat>().unwrap(), PageFormat::A4);
    assert_eq!(" letter ".parse::<PageFormat>().unwrap(), PageFormat::Letter);
    assert!("tabloid".parse::<PageFormat>().is_err());
    assert_eq!(PageFormat::Letter.size_pt(), (612.0, 792.0));
    assert_eq!(PageFormat::default().to_string(), "a4");
}

#[test]
fn builder_writes_one_page_per_image() {
    let mut b = PdfDocumentBuilder::new(PageFormat::A4);
    // Content is not validated; any bytes stand in for the JPEG stream.
    b.add_jpeg_page(b"\xFF\xD8fake", 1280, 720).unwrap();
    b.add_jpeg_page(b"\xFF\xD8fake", 800, 1200).unwrap();
    assert_eq!(b.page_count(), 2);
    assert!(approx(b.placements()[0].width, 595.28));
    assert!(approx(b.placements()[1].height, 841.89));

    let bytes = b.finish().unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 2"));
    assert!(text.contains("/DCTDecode"));
}

#[test]
fn empty_document_is_a_precondition_failure() {
    let b = PdfDocumentBuilder::new(PageFormat::Letter);
    assert!(matches!(b.finish(), Err(SlideError::PreconditionFailed(_))));
}
