use std::borrow::Cow;

use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{OverlayError, OverlayResult},
    },
    style::resolver::StyleMetrics,
    text::measure::{StyledText, TextMeasurer},
};

/// OpenType feature used for vertical glyph forms.
const VERTICAL_FORMS_FEATURE: &str = "\"vert\" on";

/// [`TextMeasurer`] backed by Parley shaping over registered font data.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasurer").finish_non_exhaustive()
    }
}

impl ParleyMeasurer {
    /// Construct a measurer with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the family names they provide.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> OverlayResult<Vec<String>> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        if families.is_empty() {
            return Err(OverlayError::configuration(
                "no font families registered from font bytes",
            ));
        }

        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            if let Some(name) = self.font_ctx.collection.family_name(*id) {
                names.push(name.to_string());
            }
        }
        tracing::debug!(?names, "registered font families");
        Ok(names)
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &StyledText, style: &StyleMetrics) -> OverlayResult<Size> {
        if text.is_empty() {
            return Err(OverlayError::invariant("cannot measure an empty line"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(style.font_family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(
            style.point_size as f32,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(style.foreground));
        for range in text.vertical_forms.byte_ranges(&text.text) {
            builder.push(
                parley::style::StyleProperty::FontFeatures(parley::style::FontSettings::Source(
                    Cow::Borrowed(VERTICAL_FORMS_FEATURE),
                )),
                range,
            );
        }

        let mut layout: parley::Layout<Rgba8> = builder.build(&text.text);
        layout.break_all_lines(None);

        let mut w = 0.0f64;
        let mut h = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(f64::from(m.advance));
            h += f64::from(m.ascent + m.descent + m.leading);
        }
        if !w.is_finite() || !h.is_finite() {
            return Err(OverlayError::invariant(format!(
                "non-finite measurement for {:?}",
                text.text
            )));
        }
        Ok(Size::new(w, h))
    }

    fn has_family(&mut self, family: &str) -> bool {
        self.font_ctx.collection.family_id(family).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_measure.rs"]
mod tests;
