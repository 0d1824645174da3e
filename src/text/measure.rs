use crate::{
    foundation::{
        core::Size,
        error::{OverlayError, OverlayResult},
    },
    style::resolver::StyleMetrics,
    text::script::{VerticalForms, is_wide_script},
};

/// A line of lyric text together with its vertical-forms marking.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyledText {
    /// Line content.
    pub text: String,
    /// Ranges rendered with vertical glyph forms.
    pub vertical_forms: VerticalForms,
}

impl StyledText {
    /// Text without vertical forms.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            vertical_forms: VerticalForms::None,
        }
    }

    /// Text marked for vertical mode; see [`VerticalForms::for_text`].
    pub fn vertical(text: impl Into<String>, per_character: bool) -> Self {
        let text = text.into();
        let vertical_forms = VerticalForms::for_text(&text, per_character);
        Self {
            text,
            vertical_forms,
        }
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Measures rendered text under the current style.
///
/// Implementations must reject empty text with [`OverlayError::Invariant`]; callers never
/// measure empty lines.
pub trait TextMeasurer {
    /// Rendered width and height of `text` under `style`.
    fn measure(&mut self, text: &StyledText, style: &StyleMetrics) -> OverlayResult<Size>;

    /// Whether `family` can be used to render text.
    fn has_family(&mut self, family: &str) -> bool;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &StyledText, style: &StyleMetrics) -> OverlayResult<Size> {
        (**self).measure(text, style)
    }

    fn has_family(&mut self, family: &str) -> bool {
        (**self).has_family(family)
    }
}

/// Deterministic measurer with a fixed advance per character.
///
/// Wide-script characters take two advances. Non-wide characters marked with vertical forms are
/// scaled by `vertical_latin_scale`, which mimics fonts that turn Latin glyphs sideways.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one narrow character.
    pub advance: f64,
    /// Height of every line.
    pub line_height: f64,
    /// Width multiplier for narrow characters rendered with vertical forms.
    pub vertical_latin_scale: f64,
    /// Known families; empty accepts any family.
    pub families: Vec<String>,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 20.0,
            vertical_latin_scale: 1.0,
            families: Vec::new(),
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&mut self, text: &StyledText, _style: &StyleMetrics) -> OverlayResult<Size> {
        if text.is_empty() {
            return Err(OverlayError::invariant("cannot measure an empty line"));
        }
        let marked = text.vertical_forms.byte_ranges(&text.text);
        let width = text
            .text
            .char_indices()
            .map(|(i, ch)| {
                if is_wide_script(ch) {
                    self.advance * 2.0
                } else if marked.iter().any(|r| r.contains(&i)) {
                    self.advance * self.vertical_latin_scale
                } else {
                    self.advance
                }
            })
            .sum::<f64>();
        Ok(Size::new(width, self.line_height))
    }

    fn has_family(&mut self, family: &str) -> bool {
        self.families.is_empty() || self.families.iter().any(|f| f == family)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
