use super::*;

#[test]
fn partial_json_takes_defaults() {
    let cfg = OverlayConfig::from_json_str(r#"{ "font_size": 30, "is_vertical_mode": true }"#)
        .unwrap();
    assert_eq!(cfg.font_size, 30.0);
    assert_eq!(cfg.orientation(), Orientation::Vertical);
    assert_eq!(cfg.font_name, OverlayConfig::default().font_name);
    assert_eq!(cfg.layout_mode(), LayoutMode::Auto);
}

#[test]
fn json_roundtrip_preserves_snapshot() {
    let cfg = OverlayConfig {
        auto_layout_enabled: false,
        vertical_position: VerticalSide::Right,
        fixed_box: FixedBox {
            x: 1.0,
            y: 2.0,
            width: 300.0,
            height: 60.0,
        },
        ..OverlayConfig::default()
    };
    let back = OverlayConfig::from_json_str(&cfg.to_json_string().unwrap()).unwrap();
    assert_eq!(back, cfg);
    assert_eq!(back.layout_mode(), LayoutMode::Fixed);
    assert_eq!(back.fixed_box.to_rect(), Rect::new(1.0, 2.0, 301.0, 62.0));
}

#[test]
fn malformed_json_is_serde_error() {
    let err = OverlayConfig::from_json_str("{ \"font_size\": \"big\" }").unwrap_err();
    assert!(matches!(err, OverlayError::Serde(_)));
}

#[test]
fn clipping_needs_mode_and_strategy() {
    let mut cfg = OverlayConfig::default();
    assert!(!cfg.clips_long_lines());
    cfg.two_line_mode_enabled = true;
    assert!(!cfg.clips_long_lines());
    cfg.two_line_mode_strategy_index = CLIP_LONG_LINE_STRATEGY;
    assert!(cfg.clips_long_lines());
    cfg.two_line_mode_enabled = false;
    assert!(!cfg.clips_long_lines());
}

#[test]
fn window_behavior_follows_preferences() {
    let cfg = OverlayConfig {
        disable_on_screen_capture: true,
        join_all_desktop_spaces: false,
        ..OverlayConfig::default()
    };
    let wb = cfg.window_behavior();
    assert!(wb.exclude_from_capture);
    assert!(!wb.join_all_spaces);
    assert!(wb.ignores_mouse && wb.floating);
}
