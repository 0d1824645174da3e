use crate::foundation::core::Rect;

/// Which lyric the first layer slot shows in two-line mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollPhase {
    /// Slot A holds the first lyric in the upper rect.
    #[default]
    FirstOnTop,
    /// Slot A holds the second lyric in the lower rect; slot B moved up.
    SecondOnTop,
}

/// Mutable overlay state carried between layout calls.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayState {
    /// Roll phase used by the next two-line layout.
    pub rolling_over: bool,
    /// The background currently carries the quarter-turn rotation.
    pub is_rotated: bool,
    /// The current two-line pair came from splitting a single line.
    pub is_clipped: bool,
    /// Last background frame, reused while hidden.
    pub background_rect: Rect,
    /// Last frame of layer slot A.
    pub first_line_rect: Rect,
    /// Last frame of layer slot B.
    pub second_line_rect: Rect,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            rolling_over: true,
            is_rotated: false,
            is_clipped: false,
            background_rect: Rect::ZERO,
            first_line_rect: Rect::ZERO,
            second_line_rect: Rect::ZERO,
        }
    }
}

impl DisplayState {
    /// Phase the next two-line layout will use.
    pub fn phase(&self) -> RollPhase {
        if self.rolling_over {
            RollPhase::FirstOnTop
        } else {
            RollPhase::SecondOnTop
        }
    }

    /// Back to [`RollPhase::FirstOnTop`]; used whenever fewer than two lines show.
    pub(crate) fn reset_roll(&mut self) {
        self.rolling_over = true;
    }

    /// Take the phase for this two-line layout and flip it for the next one.
    pub(crate) fn advance_roll(&mut self) -> RollPhase {
        let phase = self.phase();
        self.rolling_over = !self.rolling_over;
        phase
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/state.rs"]
mod tests;
