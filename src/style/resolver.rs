use crate::{
    config::{color::resolve_color, model::OverlayConfig},
    foundation::{
        core::{Rgba8, Vec2},
        error::{OverlayError, OverlayResult},
    },
    text::measure::{StyledText, TextMeasurer},
};

/// Mixed-case probe measured once per style change.
pub const VERTICAL_PROBE: &str = "ThisIsATestStringToTestLyricsIn vertical";

/// Vertical/normal width ratio above which vertical forms are applied per character.
pub const VERTICAL_PROBE_RATIO: f64 = 1.7;

/// Text shadow drawn behind both lines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    /// Shadow color.
    pub color: Rgba8,
    /// Blur radius.
    pub radius: f64,
    /// Layer shadow opacity.
    pub opacity: f64,
    /// Shadow offset; the overlay uses a centered glow.
    pub offset: Vec2,
}

/// Resolved text attributes, rebuilt atomically on every style change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleMetrics {
    /// Resolved font family.
    pub font_family: String,
    /// Font size in points.
    pub point_size: f64,
    /// Text color.
    pub foreground: Rgba8,
    /// Background fill.
    pub background: Rgba8,
    /// Optional text shadow.
    pub shadow: Option<ShadowSpec>,
    /// Vertical offset of lines inside the background.
    pub y_offset: f64,
    /// Extra background height (may be negative).
    pub background_height_pad: f64,
    /// Extra line height, `max(background_height_pad, 0)`.
    pub line_height_pad: f64,
    /// Apply vertical forms only to wide-script characters instead of whole lines.
    ///
    /// Derived from a width probe, not from real vertical shaping: mixed-script lines still come
    /// out imperfect in vertical mode.
    pub per_character_vertical_forms: bool,
}

/// Resolve a configuration snapshot into [`StyleMetrics`].
///
/// Any unresolvable color, font or size is a [`OverlayError::Configuration`]; nothing is
/// substituted.
#[tracing::instrument(skip(config, measurer), fields(font = %config.font_name))]
pub fn resolve_style<M: TextMeasurer + ?Sized>(
    config: &OverlayConfig,
    measurer: &mut M,
) -> OverlayResult<StyleMetrics> {
    let background = resolve_color("background_color", &config.background_color)?;
    let foreground = resolve_color("text_color", &config.text_color)?;

    if config.font_name.trim().is_empty() {
        return Err(OverlayError::configuration("font_name must be non-empty"));
    }
    if !measurer.has_family(&config.font_name) {
        return Err(OverlayError::configuration(format!(
            "font_name: unknown font family \"{}\"",
            config.font_name
        )));
    }
    if !config.font_size.is_finite() || config.font_size <= 0.0 {
        return Err(OverlayError::configuration(
            "font_size must be finite and > 0",
        ));
    }
    for (key, v) in [
        ("y_offset", config.y_offset),
        ("background_height_pad", config.background_height_pad),
    ] {
        if !v.is_finite() {
            return Err(OverlayError::configuration(format!("{key} must be finite")));
        }
    }

    let shadow = if config.shadow_enabled {
        if !config.shadow_radius.is_finite() || config.shadow_radius < 0.0 {
            return Err(OverlayError::configuration(
                "shadow_radius must be finite and >= 0",
            ));
        }
        Some(ShadowSpec {
            color: resolve_color("shadow_color", &config.shadow_color)?,
            radius: config.shadow_radius,
            opacity: 1.0,
            offset: Vec2::ZERO,
        })
    } else {
        None
    };

    let mut style = StyleMetrics {
        font_family: config.font_name.clone(),
        point_size: config.font_size,
        foreground,
        background,
        shadow,
        y_offset: config.y_offset,
        background_height_pad: config.background_height_pad,
        line_height_pad: config.background_height_pad.max(0.0),
        per_character_vertical_forms: false,
    };
    style.per_character_vertical_forms = probe_vertical_forms(measurer, &style)?;
    Ok(style)
}

/// Measure [`VERTICAL_PROBE`] plain and fully vertical; `true` when vertical forms blow Latin
/// runs up past [`VERTICAL_PROBE_RATIO`].
fn probe_vertical_forms<M: TextMeasurer + ?Sized>(
    measurer: &mut M,
    style: &StyleMetrics,
) -> OverlayResult<bool> {
    let normal = measurer.measure(&StyledText::plain(VERTICAL_PROBE), style)?;
    let vertical = measurer.measure(&StyledText::vertical(VERTICAL_PROBE, false), style)?;
    Ok(vertical.width > normal.width * VERTICAL_PROBE_RATIO)
}

#[cfg(test)]
impl StyleMetrics {
    pub(crate) fn for_tests() -> Self {
        Self {
            font_family: "Test Sans".to_string(),
            point_size: 24.0,
            foreground: Rgba8::new(255, 255, 255, 255),
            background: Rgba8::new(0, 0, 0, 0x66),
            shadow: None,
            y_offset: 0.0,
            background_height_pad: 0.0,
            line_height_pad: 0.0,
            per_character_vertical_forms: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolver.rs"]
mod tests;
