use super::*;
use crate::{
    config::model::{CLIP_LONG_LINE_STRATEGY, FixedBox},
    foundation::core::Point,
    screen::ScreenInfo,
    text::{measure::FixedAdvanceMeasurer, script::VerticalForms},
};

struct Fixture {
    config: OverlayConfig,
    style: StyleMetrics,
    geometry: ScreenGeometry,
    state: DisplayState,
    measurer: FixedAdvanceMeasurer,
}

impl Fixture {
    fn new() -> Self {
        Self::with_visible(Rect::new(0.0, 70.0, 1440.0, 877.0))
    }

    fn with_visible(visible_frame: Rect) -> Self {
        let geometry = ScreenGeometry::from_screen(&ScreenInfo {
            frame: Rect::new(0.0, 0.0, 1440.0, 900.0),
            visible_frame,
            backing_scale: 2.0,
            is_full_screen: false,
        })
        .unwrap();
        Self {
            config: OverlayConfig::default(),
            style: StyleMetrics::for_tests(),
            geometry,
            state: DisplayState::default(),
            measurer: FixedAdvanceMeasurer::default(),
        }
    }

    fn clipping(mut self) -> Self {
        self.config.two_line_mode_enabled = true;
        self.config.two_line_mode_strategy_index = CLIP_LONG_LINE_STRATEGY;
        self
    }

    fn vertical(mut self) -> Self {
        self.config.is_vertical_mode = true;
        self
    }

    fn run(&mut self, pair: &mut LyricPair) -> LayoutResult {
        let ctx = LayoutContext {
            config: &self.config,
            style: &self.style,
            geometry: &self.geometry,
        };
        compute_layout(pair, ctx, &mut self.state, &mut self.measurer).unwrap()
    }

    fn show(&mut self, first: Option<&str>, second: Option<&str>) -> LayoutResult {
        self.run(&mut LyricPair::new(first, second))
    }
}

fn assert_rect(actual: Rect, expected: (f64, f64, f64, f64)) {
    let (x, y, w, h) = expected;
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(
        close(actual.x0, x)
            && close(actual.y0, y)
            && close(actual.width(), w)
            && close(actual.height(), h),
        "{actual:?} != {expected:?}"
    );
}

const LONG_LINE: &str = "Hello world this is an extremely long lyric line exceeding width";

#[test]
fn pair_case_follows_first_then_second() {
    assert_eq!(LyricPair::new(None, Some("x")).case(), LineCase::Empty);
    assert_eq!(LyricPair::new(Some(""), Some("x")).case(), LineCase::Empty);
    assert_eq!(LyricPair::new(Some("a"), None).case(), LineCase::Single);
    assert_eq!(LyricPair::new(Some("a"), Some("")).case(), LineCase::Single);
    assert_eq!(LyricPair::new(Some("a"), Some("b")).case(), LineCase::Double);
}

#[test]
fn single_line_is_centered_above_the_dock() {
    let mut f = Fixture::new();
    let r = f.show(Some("hello"), None);
    assert_eq!(r.case, LineCase::Single);
    assert_rect(r.background_rect, (670.0, 85.0, 100.0, 20.0));
    assert_rect(r.first_line_rect, (0.0, 0.0, 100.0, 20.0));
    assert_eq!(r.first_line_text, StyledText::plain("hello"));
    assert!(!r.first_hidden && r.second_hidden && !r.background_hidden);
    assert_eq!(r.animation_speeds, AnimationSpeeds::uniform(1.0));
    assert_eq!(r.rotation_radians, 0.0);
    assert_eq!(r.chrome.corner_radius, BACKGROUND_CORNER_RADIUS);
    assert_eq!(r.chrome.contents_scale, 2.0);
    assert_eq!(r.window_frame, Rect::new(0.0, 0.0, 1440.0, 900.0));
}

#[test]
fn unclamped_single_lines_share_the_visible_center() {
    let mut f = Fixture::with_visible(Rect::new(37.0, 50.0, 1237.0, 800.0));
    for text in ["a", "hello", "中文歌词", "a somewhat longer line of lyrics"] {
        let r = f.show(Some(text), None);
        let center = r.background_rect.center().x;
        assert!((center - 637.0).abs() <= 1.0, "{text}: {center}");
        assert!(r.background_rect.x0 >= 4.0);
    }
}

#[test]
fn pads_and_offset_shape_the_single_line() {
    let mut f = Fixture::new();
    f.style.y_offset = 3.0;
    f.style.background_height_pad = 6.0;
    f.style.line_height_pad = 6.0;
    let r = f.show(Some("hello"), None);
    assert_rect(r.background_rect, (670.0, 85.0, 100.0, 26.0));
    assert_rect(r.first_line_rect, (0.0, 3.0, 100.0, 26.0));
}

#[test]
fn full_screen_centers_from_the_screen_origin() {
    let mut f = Fixture::with_visible(Rect::new(100.0, 70.0, 1540.0, 877.0));
    f.geometry.is_full_screen = true;
    let r = f.show(Some("hello"), None);
    assert_rect(r.background_rect, (670.0, 15.0, 100.0, 20.0));
}

#[test]
fn overflow_clamps_when_clipping_is_off() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0));
    let mut pair = LyricPair::new(Some(LONG_LINE), None);
    let r = f.run(&mut pair);
    assert_eq!(r.case, LineCase::Single);
    assert_eq!(r.background_rect.x0, 4.0);
    assert_eq!(pair.second, None);
    assert!(!f.state.is_clipped);
}

#[test]
fn overflow_clips_into_two_balanced_lines() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0)).clipping();
    let mut pair = LyricPair::new(Some(LONG_LINE), None);
    let r = f.run(&mut pair);

    assert_eq!(r.case, LineCase::Double);
    assert!(f.state.is_clipped);
    let first = pair.first.clone().unwrap();
    let second = pair.second.clone().unwrap();
    assert!(!second.is_empty());
    let budget = 400.0 - 54.0;
    for part in [&first, &second] {
        let w = f
            .measurer
            .measure(&StyledText::plain(part.as_str()), &f.style)
            .unwrap()
            .width;
        assert!(w <= budget, "{part}");
    }
    assert_eq!(r.first_line_text.text, first);
    assert_eq!(r.second_line_text.text, second);
}

#[test]
fn single_character_overflow_clamps_instead_of_clipping() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0)).clipping();
    f.measurer.advance = 1000.0;
    let r = f.show(Some("W"), None);
    assert_eq!(r.case, LineCase::Single);
    assert_eq!(r.background_rect.x0, 4.0);
    assert!(!f.state.is_clipped);
}

#[test]
fn empty_first_hides_everything_slowly() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0)).clipping();
    f.show(Some(LONG_LINE), None);
    assert!(f.state.is_clipped);

    let r = f.show(Some(""), Some("anything"));
    assert_eq!(r.case, LineCase::Empty);
    assert!(r.is_hidden());
    assert_eq!(r.animation_speeds, AnimationSpeeds::uniform(0.2));
    assert!(!f.state.is_clipped);
    assert!(f.state.rolling_over);
    assert!(r.first_line_text.is_empty() && r.second_line_text.is_empty());
}

#[test]
fn horizontal_empty_collapses_lines_into_old_background() {
    let mut f = Fixture::new();
    let shown = f.show(Some("hello"), None);
    let r = f.show(None, None);
    assert_eq!(r.background_rect, shown.background_rect);
    let third = shown.background_rect.width() / 3.0;
    assert_eq!(r.first_line_rect, Rect::new(third, 0.0, third, 0.0));
    assert_eq!(r.second_line_rect, r.first_line_rect);
}

#[test]
fn two_lines_stack_with_shared_width() {
    let mut f = Fixture::new();
    let r = f.show(Some("abc"), Some("abcdef"));
    assert_eq!(r.case, LineCase::Double);
    assert_rect(r.background_rect, (665.0, 85.0, 110.0, 36.0));
    assert_rect(r.first_line_rect, (0.0, 18.0, 110.0, 18.0));
    assert_rect(r.second_line_rect, (0.0, 0.0, 110.0, 18.0));
    assert_eq!(r.first_line_text.text, "abc");
    assert_eq!(r.second_line_text.text, "abcdef");
    assert_eq!(r.animation_speeds, AnimationSpeeds::uniform(1.0));
}

#[test]
fn two_lines_never_clip_and_clamp_to_margin() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0)).clipping();
    let mut pair = LyricPair::new(Some(LONG_LINE), Some("short"));
    let r = f.run(&mut pair);
    assert_eq!(r.case, LineCase::Double);
    assert_eq!(r.background_rect.x0, 4.0);
    assert_eq!(pair.second.as_deref(), Some("short"));
    assert!(!f.state.is_clipped);
}

#[test]
fn roll_alternates_and_resets_after_single_line() {
    let mut f = Fixture::new();
    let mut tops = Vec::new();
    for _ in 0..4 {
        let r = f.show(Some("first"), Some("second"));
        tops.push(r.first_line_rect.y0 > r.second_line_rect.y0);
        // The first lyric always ends up in the upper rect.
        let upper_text = if r.first_line_rect.y0 > r.second_line_rect.y0 {
            &r.first_line_text.text
        } else {
            &r.second_line_text.text
        };
        assert_eq!(upper_text, "first");
    }
    assert_eq!(tops, vec![true, false, true, false]);

    f.show(Some("only"), None);
    let r = f.show(Some("first"), Some("second"));
    assert_eq!(r.first_line_text.text, "first");
    assert!(r.first_line_rect.y0 > r.second_line_rect.y0);

    assert!(!f.state.rolling_over);
    f.show(None, None);
    let r = f.show(Some("first"), Some("second"));
    assert_eq!(r.first_line_text.text, "first");
}

#[test]
fn fixed_mode_uses_the_configured_box() {
    let mut f = Fixture::new();
    f.config.auto_layout_enabled = false;
    f.config.fixed_box = FixedBox::default();

    let r = f.show(Some("hello"), None);
    assert_rect(r.background_rect, (100.0, 100.0, 800.0, 100.0));
    assert_rect(r.first_line_rect, (0.0, 0.0, 800.0, 20.0));

    let r = f.show(Some("abc"), Some("abcdef"));
    assert_rect(r.background_rect, (100.0, 100.0, 800.0, 100.0));
    assert_rect(r.first_line_rect, (345.0, 50.0, 110.0, 18.0));
    assert_rect(r.second_line_rect, (345.0, 32.0, 110.0, 18.0));
}

#[test]
fn fixed_mode_never_clips() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 70.0, 400.0, 877.0)).clipping();
    f.config.auto_layout_enabled = false;
    let r = f.show(Some(LONG_LINE), None);
    assert_eq!(r.case, LineCase::Single);
    assert!(!f.state.is_clipped);
}

#[test]
fn vertical_single_line_docks_left_and_rotates() {
    let mut f = Fixture::new().vertical();
    let r = f.show(Some("hello"), None);
    assert_eq!(r.case, LineCase::Single);
    assert_eq!(r.rotation_radians, -FRAC_PI_2);
    assert!(f.state.is_rotated);
    // Track 877, width 100: slack 777, y = 877 - 388.5.
    assert_rect(r.background_rect, (0.0, 488.5, 100.0, 23.0));
    assert_rect(r.first_line_rect, (0.0, -3.0, 100.0, 21.6));
    assert_eq!(r.first_line_text.vertical_forms, VerticalForms::Whole);
}

#[test]
fn vertical_right_side_accounts_for_line_height() {
    let mut f = Fixture::new().vertical();
    f.config.vertical_position = VerticalSide::Right;
    f.style.background_height_pad = 4.0;
    let r = f.show(Some("hello"), None);
    assert!((r.background_rect.x0 - (1440.0 - 20.0 - 4.0 - 8.0)).abs() < 1e-9);

    let r = f.show(Some("abc"), Some("abcdef"));
    // Two lines: 40 tall, no background pad.
    assert!((r.background_rect.x0 - (1440.0 - 40.0 - 8.0)).abs() < 1e-9);
}

#[test]
fn vertical_forms_are_per_character_for_sideways_fonts() {
    let mut f = Fixture::new().vertical();
    f.style.per_character_vertical_forms = true;

    let r = f.show(Some("你好吗"), None);
    assert_eq!(
        r.first_line_text.vertical_forms,
        VerticalForms::PerCharacter(vec![0..3, 3..6, 6..9])
    );

    let r = f.show(Some("ab中c"), Some("xyz"));
    let text = &r.first_line_text.text;
    let marked: Vec<&str> = r
        .first_line_text
        .vertical_forms
        .byte_ranges(text)
        .into_iter()
        .map(|range| &text[range])
        .collect();
    assert_eq!(marked, vec!["中"]);
    assert_eq!(
        r.second_line_text.vertical_forms,
        VerticalForms::PerCharacter(vec![])
    );
}

#[test]
fn vertical_two_lines_are_faster_and_keep_own_widths() {
    let mut f = Fixture::new().vertical();
    let r = f.show(Some("abc"), Some("abcdef"));
    assert_eq!(r.case, LineCase::Double);
    assert_eq!(r.animation_speeds, AnimationSpeeds::uniform(1.2));
    assert_rect(r.first_line_rect, (0.0, 20.0, 80.0, 20.0));
    assert_rect(r.second_line_rect, (0.0, 0.0, 110.0, 20.0));
    assert_rect(r.background_rect, (0.0, 877.0 - 383.5, 110.0, 46.0));
}

#[test]
fn vertical_overflow_clips_and_equalizes_widths() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 0.0, 1440.0, 300.0))
        .vertical()
        .clipping();
    let mut pair = LyricPair::new(Some(LONG_LINE), None);
    let r = f.run(&mut pair);
    assert_eq!(r.case, LineCase::Double);
    assert!(f.state.is_clipped);
    assert_eq!(r.first_line_rect.width(), r.second_line_rect.width());
    assert_eq!(r.rotation_radians, -FRAC_PI_2);
}

#[test]
fn vertical_overflow_without_clipping_keeps_minimum_slack() {
    let mut f = Fixture::with_visible(Rect::new(0.0, 0.0, 1440.0, 300.0)).vertical();
    let r = f.show(Some(LONG_LINE), None);
    assert_eq!(r.case, LineCase::Single);
    assert!((r.background_rect.y0 - 296.0).abs() < 1e-9);
}

#[test]
fn vertical_empty_keeps_rotation_and_frames() {
    let mut f = Fixture::new().vertical();
    let shown = f.show(Some("hello"), None);
    let r = f.show(None, Some("ignored"));
    assert!(r.is_hidden());
    assert_eq!(r.rotation_radians, -FRAC_PI_2);
    assert!(f.state.is_rotated);
    assert_eq!(r.first_line_rect, shown.first_line_rect);
    assert_eq!(r.background_rect, shown.background_rect);
}

#[test]
fn switching_back_to_horizontal_undoes_rotation() {
    let mut f = Fixture::new().vertical();
    f.show(Some("hello"), None);
    assert!(f.state.is_rotated);

    f.config.is_vertical_mode = false;
    let r = f.show(Some("hello"), None);
    assert_eq!(r.rotation_radians, 0.0);
    assert!(!f.state.is_rotated);
    assert_eq!(r.background_rect.origin(), Point::new(670.0, 85.0));
}

#[test]
fn hidden_layout_resets_flags() {
    let mut state = DisplayState {
        rolling_over: false,
        is_rotated: true,
        is_clipped: true,
        ..DisplayState::default()
    };
    let r = hidden_layout(&mut state, Rect::ZERO);
    assert!(r.is_hidden());
    assert!(state.rolling_over && !state.is_rotated && !state.is_clipped);
}
