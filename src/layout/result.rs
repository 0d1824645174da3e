use crate::{
    foundation::core::{Rect, Rgba8},
    style::resolver::ShadowSpec,
    text::measure::StyledText,
};

/// Corner radius of the background layer.
pub const BACKGROUND_CORNER_RADIUS: f64 = 12.0;

/// How many lyric lines a layout shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCase {
    /// Nothing visible (instrumental, or no usable style).
    Empty,
    /// One line.
    Single,
    /// Two stacked lines.
    Double,
}

/// Animation speed factor per layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpeeds {
    /// Background layer.
    pub background: f64,
    /// Layer slot A.
    pub first_line: f64,
    /// Layer slot B.
    pub second_line: f64,
}

impl AnimationSpeeds {
    /// Same factor on every layer.
    pub fn uniform(factor: f64) -> Self {
        Self {
            background: factor,
            first_line: factor,
            second_line: factor,
        }
    }
}

/// Static appearance of the layers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerChrome {
    /// Background fill.
    pub background: Rgba8,
    /// Text color of both lines.
    pub foreground: Rgba8,
    /// Shadow of both lines; `None` means zero shadow opacity.
    pub shadow: Option<ShadowSpec>,
    /// Background corner radius.
    pub corner_radius: f64,
    /// Contents scale of the text layers.
    pub contents_scale: f64,
}

impl Default for LayerChrome {
    fn default() -> Self {
        Self {
            background: Rgba8::transparent(),
            foreground: Rgba8::transparent(),
            shadow: None,
            corner_radius: BACKGROUND_CORNER_RADIUS,
            contents_scale: 1.0,
        }
    }
}

/// Everything the rendering layer needs for one update.
///
/// The background rect is in screen coordinates (bottom-left origin); line rects are relative to
/// the background. Slot A/B are the two text layers; which lyric each shows depends on the roll
/// phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutResult {
    /// Number of visible lines.
    pub case: LineCase,
    /// Background frame.
    pub background_rect: Rect,
    /// Frame of layer slot A.
    pub first_line_rect: Rect,
    /// Frame of layer slot B.
    pub second_line_rect: Rect,
    /// Content of layer slot A.
    pub first_line_text: StyledText,
    /// Content of layer slot B.
    pub second_line_text: StyledText,
    /// Slot A hidden.
    pub first_hidden: bool,
    /// Slot B hidden.
    pub second_hidden: bool,
    /// Background hidden.
    pub background_hidden: bool,
    /// Rotation applied to the background around its origin.
    pub rotation_radians: f64,
    /// Layer animation speeds.
    pub animation_speeds: AnimationSpeeds,
    /// Overlay window frame.
    pub window_frame: Rect,
    /// Colors, shadow and corner radius.
    pub chrome: LayerChrome,
}

impl LayoutResult {
    /// Return `true` when nothing is drawn.
    pub fn is_hidden(&self) -> bool {
        self.background_hidden && self.first_hidden && self.second_hidden
    }
}
