use crate::foundation::{
    core::{Point, Rect, Size},
    error::{OverlayError, OverlayResult},
};

/// Raw facts about the main screen, reported by the shell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenInfo {
    /// Whole screen frame.
    pub frame: Rect,
    /// Screen frame minus menu bar and dock.
    pub visible_frame: Rect,
    /// Device pixels per point.
    pub backing_scale: f64,
    /// A full-screen app owns the screen; the visible origin is ignored.
    pub is_full_screen: bool,
}

/// Cached screen geometry the layout calculator works against.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenGeometry {
    /// Bottom-left of the visible area.
    pub visible_origin: Point,
    /// Size of the visible area.
    pub visible_size: Size,
    /// Center against `(0, 0)` instead of the visible origin.
    pub is_full_screen: bool,
    /// Frame of the overlay window; it covers the whole screen.
    pub window_frame: Rect,
    /// Contents scale for the text layers.
    pub contents_scale: f64,
}

impl ScreenGeometry {
    /// Rebuild geometry from the latest screen facts.
    pub fn from_screen(info: &ScreenInfo) -> OverlayResult<Self> {
        let finite = |r: Rect| [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
        if !finite(info.frame) || !finite(info.visible_frame) {
            return Err(OverlayError::invariant("screen frames must be finite"));
        }
        if !info.backing_scale.is_finite() || info.backing_scale <= 0.0 {
            return Err(OverlayError::invariant(
                "backing scale must be finite and > 0",
            ));
        }
        Ok(Self {
            visible_origin: info.visible_frame.origin(),
            visible_size: info.visible_frame.size(),
            is_full_screen: info.is_full_screen,
            window_frame: info.frame,
            contents_scale: info.backing_scale,
        })
    }

    /// Left/bottom reference point for auto layout.
    pub(crate) fn layout_origin(&self) -> Point {
        if self.is_full_screen {
            Point::ZERO
        } else {
            self.visible_origin
        }
    }

    /// Top of the visible area measured from the screen bottom; the vertical-mode track length.
    pub fn height_with_dock(&self) -> f64 {
        self.visible_origin.y + self.visible_size.height
    }
}

#[cfg(test)]
#[path = "../tests/unit/screen.rs"]
mod tests;
