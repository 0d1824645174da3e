pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight-alpha RGBA8 color, also used as the Parley brush type.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Text flow of the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Lines run left to right along the bottom of the screen.
    #[default]
    Horizontal,
    /// The overlay is rotated a quarter turn and docked to a screen side.
    Vertical,
}

/// How the horizontal overlay is positioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Centered against the visible screen area, sized to the text.
    #[default]
    Auto,
    /// Placed at the user-configured constant box.
    Fixed,
}

/// Screen side a vertical overlay docks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalSide {
    /// Left edge of the visible area.
    #[default]
    Left,
    /// Right edge of the visible area.
    Right,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
