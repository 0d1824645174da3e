use crate::foundation::{
    core::{LayoutMode, Orientation, Rect, VerticalSide},
    error::{OverlayError, OverlayResult},
};

/// Two-line strategy index that splits an over-wide single line into two.
pub const CLIP_LONG_LINE_STRATEGY: u32 = 1;

/// User-configured constant box used in [`LayoutMode::Fixed`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FixedBox {
    /// Distance from the screen's left edge.
    pub x: f64,
    /// Distance from the screen's bottom edge.
    pub y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Default for FixedBox {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 800.0,
            height: 100.0,
        }
    }
}

impl FixedBox {
    /// The box as a screen-space rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Snapshot of every preference the overlay reads.
///
/// Colors stay as strings here; they are resolved (and rejected) by the style resolver so that a
/// bad preference keeps the overlay hidden instead of failing the whole snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Background fill, `#RRGGBB` or `#RRGGBBAA`.
    pub background_color: String,
    /// Text fill, `#RRGGBB` or `#RRGGBBAA`.
    pub text_color: String,
    /// Font family name; must be known to the text measurer.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f64,
    /// Vertical offset of the lines inside the background.
    pub y_offset: f64,
    /// Extra background height; negative values shrink the background only.
    pub background_height_pad: f64,
    /// Draw a glow-style shadow behind the text.
    pub shadow_enabled: bool,
    /// Shadow color, `#RRGGBB` or `#RRGGBBAA`.
    pub shadow_color: String,
    /// Shadow blur radius.
    pub shadow_radius: f64,
    /// Rotate the overlay and dock it to a screen side.
    pub is_vertical_mode: bool,
    /// Side used by vertical mode.
    pub vertical_position: VerticalSide,
    /// Center against the screen instead of using [`OverlayConfig::fixed_box`].
    pub auto_layout_enabled: bool,
    /// Constant box used when auto layout is off.
    pub fixed_box: FixedBox,
    /// Gap between the dock (visible area bottom) and the overlay.
    pub dock_gap: f64,
    /// Enable two-line handling.
    pub two_line_mode_enabled: bool,
    /// Selected two-line strategy; [`CLIP_LONG_LINE_STRATEGY`] splits long lines.
    pub two_line_mode_strategy_index: u32,
    /// Hide the overlay window from screen captures.
    pub disable_on_screen_capture: bool,
    /// Show the overlay window on every desktop space.
    pub join_all_desktop_spaces: bool,
    /// Single line laid out when the engine starts.
    pub startup_text: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            background_color: "#00000066".to_string(),
            text_color: "#FFFFFFFF".to_string(),
            font_name: "Helvetica".to_string(),
            font_size: 24.0,
            y_offset: 0.0,
            background_height_pad: 0.0,
            shadow_enabled: false,
            shadow_color: "#00D1FFFF".to_string(),
            shadow_radius: 2.0,
            is_vertical_mode: false,
            vertical_position: VerticalSide::Left,
            auto_layout_enabled: true,
            fixed_box: FixedBox::default(),
            dock_gap: 15.0,
            two_line_mode_enabled: false,
            two_line_mode_strategy_index: 0,
            disable_on_screen_capture: false,
            join_all_desktop_spaces: true,
            startup_text: "LyricsX".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Parse a (possibly partial) JSON snapshot; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        serde_json::from_str(s).map_err(|e| OverlayError::serde(e.to_string()))
    }

    /// Serialize the snapshot as pretty JSON.
    pub fn to_json_string(&self) -> OverlayResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| OverlayError::serde(e.to_string()))
    }

    /// Orientation selected by `is_vertical_mode`.
    pub fn orientation(&self) -> Orientation {
        if self.is_vertical_mode {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Layout mode selected by `auto_layout_enabled`.
    pub fn layout_mode(&self) -> LayoutMode {
        if self.auto_layout_enabled {
            LayoutMode::Auto
        } else {
            LayoutMode::Fixed
        }
    }

    /// Whether an over-wide single line is split instead of clamped.
    pub fn clips_long_lines(&self) -> bool {
        self.two_line_mode_enabled && self.two_line_mode_strategy_index == CLIP_LONG_LINE_STRATEGY
    }

    /// Window flags the shell applies when it creates the overlay window.
    pub fn window_behavior(&self) -> WindowBehavior {
        WindowBehavior {
            exclude_from_capture: self.disable_on_screen_capture,
            join_all_spaces: self.join_all_desktop_spaces,
            ignores_mouse: true,
            floating: true,
        }
    }
}

/// Window-level flags for the shell that owns the overlay window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowBehavior {
    /// Window content is not shared with screen capture.
    pub exclude_from_capture: bool,
    /// Window joins every desktop space.
    pub join_all_spaces: bool,
    /// Clicks pass through to the windows below.
    pub ignores_mouse: bool,
    /// Window sits at floating level above normal windows.
    pub floating: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
