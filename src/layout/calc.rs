use std::f64::consts::FRAC_PI_2;

use crate::{
    config::model::OverlayConfig,
    foundation::{
        core::{LayoutMode, Orientation, Rect, Size, VerticalSide},
        error::{OverlayError, OverlayResult},
    },
    layout::{
        clip::clip_line,
        result::{AnimationSpeeds, BACKGROUND_CORNER_RADIUS, LayerChrome, LayoutResult, LineCase},
        state::{DisplayState, RollPhase},
    },
    screen::ScreenGeometry,
    style::resolver::StyleMetrics,
    text::measure::{StyledText, TextMeasurer},
};

/// Breathing room added to every measured line width.
const LINE_WIDTH_PAD: f64 = 50.0;
/// Closest the horizontal overlay may come to the screen's left edge.
const HORIZONTAL_EDGE_MARGIN: f64 = 4.0;
/// Smallest slack kept along the vertical track.
const VERTICAL_EDGE_MARGIN: f64 = 8.0;
/// Width removed from the track to get the clip budget.
const CLIP_BUDGET_INSET: f64 = 54.0;
/// Height scale of stacked horizontal lines.
const STACKED_LINE_HEIGHT_SCALE: f64 = 0.9;
/// Speed of layers fading out for an instrumental break.
const HIDDEN_SPEED: f64 = 0.2;
/// Speed of vertical two-line updates.
const VERTICAL_DOUBLE_SPEED: f64 = 1.2;
/// Rotation of the vertical overlay.
const VERTICAL_ROTATION: f64 = -FRAC_PI_2;
/// One normal pass plus one pass over a clipped pair.
const MAX_LAYOUT_PASSES: usize = 2;

/// The lyric lines currently on display.
///
/// An empty or missing `first` hides the overlay regardless of `second`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LyricPair {
    /// Main line.
    pub first: Option<String>,
    /// Secondary line (translation, or the tail of a clipped line).
    pub second: Option<String>,
}

impl LyricPair {
    /// Build a pair from borrowed lines.
    pub fn new(first: Option<&str>, second: Option<&str>) -> Self {
        Self {
            first: first.map(str::to_string),
            second: second.map(str::to_string),
        }
    }

    /// Number of lines this pair displays.
    pub fn case(&self) -> LineCase {
        match (non_empty(&self.first), non_empty(&self.second)) {
            (None, _) => LineCase::Empty,
            (Some(_), None) => LineCase::Single,
            (Some(_), Some(_)) => LineCase::Double,
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Read-only inputs of one layout call.
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    /// Preference snapshot (orientation, layout mode, boxes, gaps).
    pub config: &'a OverlayConfig,
    /// Resolved style.
    pub style: &'a StyleMetrics,
    /// Cached screen geometry.
    pub geometry: &'a ScreenGeometry,
}

enum Pass {
    Laid(LayoutResult),
    /// A single line overflowed and should be clipped to this width.
    Overflow { budget: f64 },
}

/// Lay out `pair`, splitting an over-wide single line at most once.
///
/// `pair` is the working copy: after a clip it holds the split lines. `state` carries the roll,
/// rotation and clip flags between calls.
pub fn compute_layout<M: TextMeasurer + ?Sized>(
    pair: &mut LyricPair,
    ctx: LayoutContext<'_>,
    state: &mut DisplayState,
    measurer: &mut M,
) -> OverlayResult<LayoutResult> {
    let orientation = ctx.config.orientation();
    for pass in 0..MAX_LAYOUT_PASSES {
        // Undo the quarter turn; vertical layouts apply it again.
        state.is_rotated = false;
        tracing::debug!(pass, ?orientation, case = ?pair.case(), "layout pass");

        let outcome = match orientation {
            Orientation::Horizontal => layout_horizontal(pair, ctx, state, measurer)?,
            Orientation::Vertical => layout_vertical(pair, ctx, state, measurer)?,
        };
        match outcome {
            Pass::Laid(result) => {
                state.background_rect = result.background_rect;
                state.first_line_rect = result.first_line_rect;
                state.second_line_rect = result.second_line_rect;
                return Ok(result);
            }
            Pass::Overflow { budget } => {
                if pass > 0 {
                    return Err(OverlayError::invariant(
                        "a clipped pair overflowed again",
                    ));
                }
                let first = non_empty(&pair.first)
                    .ok_or_else(|| OverlayError::invariant("overflow without a first line"))?;
                let clipped = clip_line(first, budget, measurer, ctx.style)?;
                *pair = LyricPair {
                    first: Some(clipped.former),
                    second: Some(clipped.latter),
                };
                state.is_clipped = true;
            }
        }
    }
    Err(OverlayError::invariant("layout did not settle"))
}

/// Result for an overlay with no usable style: everything hidden, frames kept.
pub(crate) fn hidden_layout(state: &mut DisplayState, window_frame: Rect) -> LayoutResult {
    state.reset_roll();
    state.is_clipped = false;
    state.is_rotated = false;
    LayoutResult {
        case: LineCase::Empty,
        background_rect: state.background_rect,
        first_line_rect: state.first_line_rect,
        second_line_rect: state.second_line_rect,
        first_line_text: StyledText::default(),
        second_line_text: StyledText::default(),
        first_hidden: true,
        second_hidden: true,
        background_hidden: true,
        rotation_radians: 0.0,
        animation_speeds: AnimationSpeeds::uniform(HIDDEN_SPEED),
        window_frame,
        chrome: LayerChrome::default(),
    }
}

fn layout_horizontal<M: TextMeasurer + ?Sized>(
    pair: &LyricPair,
    ctx: LayoutContext<'_>,
    state: &mut DisplayState,
    measurer: &mut M,
) -> OverlayResult<Pass> {
    let style = ctx.style;
    let cfg = ctx.config;
    let geo = ctx.geometry;

    let (Some(first), second) = (non_empty(&pair.first), non_empty(&pair.second)) else {
        state.reset_roll();
        state.is_clipped = false;
        // Collapse both lines to a point a third into the old background.
        let collapsed = frame(state.background_rect.width() / 3.0, 0.0, 0.0, 0.0);
        return Ok(Pass::Laid(LayoutResult {
            first_line_rect: collapsed,
            second_line_rect: collapsed,
            ..empty_result(ctx, state, 0.0)
        }));
    };

    let Some(second) = second else {
        state.reset_roll();
        state.is_clipped = false;
        let line = StyledText::plain(first);
        let size = measurer.measure(&line, style)?;

        let (background_rect, line_rect) = match cfg.layout_mode() {
            LayoutMode::Auto => {
                let w = size.width + LINE_WIDTH_PAD;
                let (mut x, y) = auto_origin(cfg, geo, w);
                if x < HORIZONTAL_EDGE_MARGIN {
                    if can_clip(cfg, first) {
                        return Ok(Pass::Overflow {
                            budget: geo.visible_size.width - CLIP_BUDGET_INSET,
                        });
                    }
                    x = HORIZONTAL_EDGE_MARGIN;
                }
                (
                    frame(x, y, w, size.height + style.background_height_pad),
                    frame(0.0, style.y_offset, w, size.height + style.line_height_pad),
                )
            }
            LayoutMode::Fixed => {
                let b = cfg.fixed_box;
                (
                    frame(b.x, b.y, b.width, b.height),
                    frame(0.0, 0.0, b.width, size.height),
                )
            }
        };

        return Ok(Pass::Laid(single_result(
            ctx,
            background_rect,
            line_rect,
            line,
            state,
            0.0,
        )));
    };

    let stacked = |size: Size| {
        Size::new(
            size.width + LINE_WIDTH_PAD,
            size.height * STACKED_LINE_HEIGHT_SCALE,
        )
    };
    let first_line = StyledText::plain(first);
    let second_line = StyledText::plain(second);
    let size2 = stacked(measurer.measure(&second_line, style)?);
    let size1 = stacked(measurer.measure(&first_line, style)?);

    let width = size1.width.max(size2.width);
    let mut upper = frame(
        0.0,
        size2.height + style.y_offset,
        width,
        size1.height + style.line_height_pad,
    );
    let mut lower = frame(0.0, style.y_offset, width, size2.height + style.line_height_pad);

    let background_rect = match cfg.layout_mode() {
        LayoutMode::Auto => {
            let (x, y) = auto_origin(cfg, geo, width);
            let x = x.max(HORIZONTAL_EDGE_MARGIN);
            frame(x, y, width, upper.height() + lower.height())
        }
        LayoutMode::Fixed => {
            let b = cfg.fixed_box;
            upper = frame(
                (b.width - upper.width()) / 2.0,
                b.height / 2.0,
                upper.width(),
                upper.height(),
            );
            lower = frame(
                (b.width - lower.width()) / 2.0,
                b.height / 2.0 - lower.height(),
                lower.width(),
                lower.height(),
            );
            frame(b.x, b.y, b.width, b.height)
        }
    };

    Ok(Pass::Laid(double_result(
        ctx,
        background_rect,
        (upper, first_line),
        (lower, second_line),
        state,
        0.0,
        1.0,
    )))
}

fn layout_vertical<M: TextMeasurer + ?Sized>(
    pair: &LyricPair,
    ctx: LayoutContext<'_>,
    state: &mut DisplayState,
    measurer: &mut M,
) -> OverlayResult<Pass> {
    let style = ctx.style;
    let cfg = ctx.config;
    let geo = ctx.geometry;
    let per_char = style.per_character_vertical_forms;
    let track = geo.height_with_dock();

    let (Some(first), second) = (non_empty(&pair.first), non_empty(&pair.second)) else {
        state.reset_roll();
        state.is_clipped = false;
        state.is_rotated = true;
        return Ok(Pass::Laid(empty_result(ctx, state, VERTICAL_ROTATION)));
    };

    let Some(second) = second else {
        state.reset_roll();
        state.is_clipped = false;
        let line = StyledText::vertical(first, per_char);
        let size = measurer.measure(&line, style)?;
        let w = size.width + LINE_WIDTH_PAD;
        let h = size.height;

        let mut slack = track - w;
        if slack < VERTICAL_EDGE_MARGIN {
            if can_clip(cfg, first) {
                return Ok(Pass::Overflow {
                    budget: track - CLIP_BUDGET_INSET,
                });
            }
            slack = VERTICAL_EDGE_MARGIN;
        }
        let y = track - slack / 2.0;
        let x = match cfg.vertical_position {
            VerticalSide::Left => geo.visible_origin.x,
            VerticalSide::Right => {
                geo.visible_origin.x + geo.visible_size.width
                    - h
                    - style.background_height_pad
                    - VERTICAL_EDGE_MARGIN
            }
        };

        let background_rect = frame(x, y, w, h * 1.15 + style.background_height_pad);
        let line_rect = frame(
            0.0,
            -h * 0.15 + style.y_offset,
            w,
            h * 1.08 + style.line_height_pad,
        );
        state.is_rotated = true;
        return Ok(Pass::Laid(single_result(
            ctx,
            background_rect,
            line_rect,
            line,
            state,
            VERTICAL_ROTATION,
        )));
    };

    let first_line = StyledText::vertical(first, per_char);
    let second_line = StyledText::vertical(second, per_char);
    let size1 = measurer.measure(&first_line, style)?;
    let size2 = measurer.measure(&second_line, style)?;
    let w1 = size1.width + LINE_WIDTH_PAD;
    let w2 = size2.width + LINE_WIDTH_PAD;

    let width = w1.max(w2);
    // Clipped halves share one column width so they read as one sentence.
    let (w1, w2) = if state.is_clipped {
        (width, width)
    } else {
        (w1, w2)
    };
    let upper = frame(
        0.0,
        size2.height + style.y_offset,
        w1,
        size1.height + style.line_height_pad,
    );
    let lower = frame(0.0, style.y_offset, w2, size2.height + style.line_height_pad);
    let height = upper.height() + lower.height();

    let slack = (track - width).max(VERTICAL_EDGE_MARGIN);
    let y = track - slack / 2.0;
    let x = match cfg.vertical_position {
        VerticalSide::Left => geo.visible_origin.x,
        VerticalSide::Right => {
            geo.visible_origin.x + geo.visible_size.width - height - VERTICAL_EDGE_MARGIN
        }
    };

    state.is_rotated = true;
    Ok(Pass::Laid(double_result(
        ctx,
        frame(x, y, width, height * 1.15),
        (upper, first_line),
        (lower, second_line),
        state,
        VERTICAL_ROTATION,
        VERTICAL_DOUBLE_SPEED,
    )))
}

/// Rect from origin and size without normalizing negative extents.
fn frame(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

/// Centered x and dock-gap y for an auto-layout background of width `w`.
fn auto_origin(cfg: &OverlayConfig, geo: &ScreenGeometry, w: f64) -> (f64, f64) {
    let origin = geo.layout_origin();
    (
        origin.x + (geo.visible_size.width - w) / 2.0,
        origin.y + cfg.dock_gap,
    )
}

fn can_clip(cfg: &OverlayConfig, line: &str) -> bool {
    cfg.clips_long_lines() && line.chars().nth(1).is_some()
}

fn chrome(ctx: LayoutContext<'_>) -> LayerChrome {
    LayerChrome {
        background: ctx.style.background,
        foreground: ctx.style.foreground,
        shadow: ctx.style.shadow,
        corner_radius: BACKGROUND_CORNER_RADIUS,
        contents_scale: ctx.geometry.contents_scale,
    }
}

fn empty_result(
    ctx: LayoutContext<'_>,
    state: &DisplayState,
    rotation_radians: f64,
) -> LayoutResult {
    LayoutResult {
        case: LineCase::Empty,
        background_rect: state.background_rect,
        first_line_rect: state.first_line_rect,
        second_line_rect: state.second_line_rect,
        first_line_text: StyledText::default(),
        second_line_text: StyledText::default(),
        first_hidden: true,
        second_hidden: true,
        background_hidden: true,
        rotation_radians,
        animation_speeds: AnimationSpeeds::uniform(HIDDEN_SPEED),
        window_frame: ctx.geometry.window_frame,
        chrome: chrome(ctx),
    }
}

fn single_result(
    ctx: LayoutContext<'_>,
    background_rect: Rect,
    line_rect: Rect,
    line: StyledText,
    state: &DisplayState,
    rotation_radians: f64,
) -> LayoutResult {
    LayoutResult {
        case: LineCase::Single,
        background_rect,
        first_line_rect: line_rect,
        second_line_rect: state.second_line_rect,
        first_line_text: line,
        second_line_text: StyledText::default(),
        first_hidden: false,
        second_hidden: true,
        background_hidden: false,
        rotation_radians,
        animation_speeds: AnimationSpeeds::uniform(1.0),
        window_frame: ctx.geometry.window_frame,
        chrome: chrome(ctx),
    }
}

/// Assign the upper/lower lines to layer slots by roll phase, then flip the phase.
fn double_result(
    ctx: LayoutContext<'_>,
    background_rect: Rect,
    upper: (Rect, StyledText),
    lower: (Rect, StyledText),
    state: &mut DisplayState,
    rotation_radians: f64,
    speed: f64,
) -> LayoutResult {
    let (slot_a, slot_b) = match state.advance_roll() {
        RollPhase::FirstOnTop => (upper, lower),
        RollPhase::SecondOnTop => (lower, upper),
    };
    LayoutResult {
        case: LineCase::Double,
        background_rect,
        first_line_rect: slot_a.0,
        second_line_rect: slot_b.0,
        first_line_text: slot_a.1,
        second_line_text: slot_b.1,
        first_hidden: false,
        second_hidden: false,
        background_hidden: false,
        rotation_radians,
        animation_speeds: AnimationSpeeds::uniform(speed),
        window_frame: ctx.geometry.window_frame,
        chrome: chrome(ctx),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/calc.rs"]
mod tests;
