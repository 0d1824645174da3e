use super::*;

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut m = ParleyMeasurer::new();
    let err = m.register_font(b"definitely not a font").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn unknown_family_is_not_found() {
    let mut m = ParleyMeasurer::new();
    assert!(!m.has_family("No Such Family 7f3a"));
}

#[test]
fn empty_line_is_refused_before_shaping() {
    let mut m = ParleyMeasurer::new();
    let err = m
        .measure(&StyledText::plain(""), &StyleMetrics::for_tests())
        .unwrap_err();
    assert!(matches!(err, OverlayError::Invariant(_)));
}

fn dejavu() -> ParleyMeasurer {
    let font_bytes = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    let mut m = ParleyMeasurer::new();
    let names = m.register_font(&font_bytes).unwrap();
    assert_eq!(names, vec!["DejaVu Sans".to_string()]);
    m
}

fn dejavu_style() -> StyleMetrics {
    StyleMetrics {
        font_family: "DejaVu Sans".to_string(),
        ..StyleMetrics::for_tests()
    }
}

#[test]
fn registered_font_is_known_by_family() {
    let mut m = dejavu();
    assert!(m.has_family("DejaVu Sans"));
}

#[test]
fn shaped_width_grows_with_text_length() {
    let mut m = dejavu();
    let style = dejavu_style();
    let short = m.measure(&StyledText::plain("Hello lyrics"), &style).unwrap();
    let long = m
        .measure(&StyledText::plain("Hello lyrics, hello again lyrics"), &style)
        .unwrap();

    assert!(short.width > 0.0 && short.height > 0.0);
    assert!(long.width > short.width);
    // One line either way, so the summed line metrics agree.
    assert!((long.height - short.height).abs() < 1e-6);
}

#[test]
fn vertical_ranges_shape_to_a_finite_size() {
    let mut m = dejavu();
    let style = dejavu_style();
    for text in [
        StyledText::vertical("Go 春天", true),
        StyledText::vertical("Go 春天", false),
    ] {
        let size = m.measure(&text, &style).unwrap();
        assert!(size.width.is_finite() && size.width > 0.0, "{text:?}");
        assert!(size.height.is_finite() && size.height > 0.0, "{text:?}");
    }
}

#[test]
fn style_resolves_against_registered_font() {
    let mut m = dejavu();
    let cfg = crate::config::model::OverlayConfig {
        font_name: "DejaVu Sans".to_string(),
        ..Default::default()
    };
    let style = crate::style::resolver::resolve_style(&cfg, &mut m).unwrap();
    assert_eq!(style.font_family, "DejaVu Sans");
    assert!(!style.per_character_vertical_forms);
}
