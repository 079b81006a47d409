use super::*;

fn local_font() -> Option<Vec<u8>> {
    let candidates = [
        std::env::var("PHOTOPOST_TEST_FONT").unwrap_or_default(),
        "assets/font.ttf".to_string(),
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
        "/usr/share/fonts/TTF/DejaVuSans.ttf".to_string(),
    ];
    candidates
        .iter()
        .filter(|p| !p.is_empty())
        .find_map(|p| std::fs::read(p).ok())
}

#[test]
fn missing_font_file_is_an_asset_error() {
    let err = TextLayoutEngine::from_font_file(Path::new("no/such/font.ttf"))
        .err()
        .unwrap();
    assert!(matches!(err, PhotopostError::AssetUnavailable(_)));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    assert!(TextLayoutEngine::from_font_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn brush_from_rgba_keeps_channels() {
    let b = TextBrushRgba8::from(Rgba([1, 2, 3, 4]));
    assert_eq!(
        b,
        TextBrushRgba8 {
            r: 1,
            g: 2,
            b: 3,
            a: 4
        }
    );
}

#[test]
fn text_width_grows_with_size_if_font_present() {
    let Some(bytes) = local_font() else {
        return;
    };

    let mut engine = TextLayoutEngine::from_font_bytes(bytes).unwrap();
    assert!(!engine.family_name().is_empty());

    let small = engine.layout_line("01:30", 20.0, Rgba([0, 0, 0, 255])).unwrap();
    let large = engine.layout_line("01:30", 40.0, Rgba([0, 0, 0, 255])).unwrap();
    assert!(small.width() > 0.0);
    assert!(large.width() > small.width() * 1.5);
    assert!(large.height() > small.height());
    assert!(engine.layout_line("x", 0.0, Rgba([0, 0, 0, 255])).is_err());
}
