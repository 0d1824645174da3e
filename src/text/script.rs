use std::ops::Range;

/// Which parts of a line render with vertical glyph forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalForms {
    /// Plain horizontal glyphs.
    #[default]
    None,
    /// Every character uses vertical forms.
    Whole,
    /// Only the listed byte ranges (one character each) use vertical forms.
    PerCharacter(Vec<Range<usize>>),
}

impl VerticalForms {
    /// Pick the vertical-forms marking for `text`.
    ///
    /// With `per_character` set (the font turns Latin runs sideways when the whole line gets
    /// vertical forms), only wide-script characters are marked, each as its own range.
    pub fn for_text(text: &str, per_character: bool) -> Self {
        if !per_character {
            return Self::Whole;
        }
        Self::PerCharacter(
            text.char_indices()
                .filter(|&(_, ch)| is_wide_script(ch))
                .map(|(i, ch)| i..i + ch.len_utf8())
                .collect(),
        )
    }

    /// Byte ranges of `text` that carry vertical forms.
    pub fn byte_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Self::None => Vec::new(),
            Self::Whole if text.is_empty() => Vec::new(),
            Self::Whole => vec![0..text.len()],
            Self::PerCharacter(ranges) => ranges.clone(),
        }
    }
}

/// Classify a character as wide script for per-character vertical forms.
///
/// Every `char` whose UTF-8 encoding takes three bytes counts as wide. That is an approximation
/// of CJK versus Latin: kana, hangul and ideographs are caught, but so are typographic quotes,
/// ellipses, dashes, Thai and Devanagari, while supplementary-plane ideographs are not. True
/// vertical shaping is left to the renderer.
pub fn is_wide_script(ch: char) -> bool {
    matches!(u32::from(ch), 0x0800..=0xFFFF)
}

#[cfg(test)]
#[path = "../../tests/unit/text/script.rs"]
mod tests;
