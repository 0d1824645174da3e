use crate::{
    foundation::error::{OverlayError, OverlayResult},
    style::resolver::StyleMetrics,
    text::measure::{StyledText, TextMeasurer},
};

/// Bracket pairs tried when the line ends in a closing bracket.
const BRACKETS: [(char, char); 7] = [
    ('【', '】'),
    ('〖', '〗'),
    ('「', '」'),
    ('[', ']'),
    ('<', '>'),
    ('（', '）'),
    ('(', ')'),
];

/// Delimiters tried in priority order; the delimiter itself is dropped.
const DELIMITERS: [char; 3] = ['/', '，', ','];

/// Split rule that produced a [`ClippedLine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipStage {
    /// Trailing bracketed clause moved to the second line.
    Bracket,
    /// Split around the first usable `/`, `，` or `,`.
    Delimiter,
    /// Split at the space nearest the middle.
    CenterSpace,
    /// Unconditional split in the middle.
    HardCenter,
}

/// An over-wide line split into two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClippedLine {
    /// Upper part.
    pub former: String,
    /// Lower part.
    pub latter: String,
    /// Rule that produced the split.
    pub stage: ClipStage,
}

/// Split `text` into two lines that each measure within `width_budget`.
///
/// Rules are tried in order: trailing bracket clause, delimiter, space nearest the center, hard
/// center split. The last rule always applies, so clipping never fails for text with at least two
/// characters; shorter text is rejected as an invariant violation.
pub fn clip_line<M: TextMeasurer + ?Sized>(
    text: &str,
    width_budget: f64,
    measurer: &mut M,
    style: &StyleMetrics,
) -> OverlayResult<ClippedLine> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 2 {
        return Err(OverlayError::invariant(
            "clipping needs at least two characters",
        ));
    }

    let mut fits = |former: &[char], latter: &[char]| -> OverlayResult<bool> {
        if former.is_empty() || latter.is_empty() {
            return Ok(false);
        }
        for part in [former, latter] {
            let s = StyledText::plain(part.iter().collect::<String>());
            if measurer.measure(&s, style)?.width > width_budget {
                return Ok(false);
            }
        }
        Ok(true)
    };

    let clipped = 'clip: {
        if let Some((open, close)) = trailing_bracket_clause(&chars)
            && fits(&chars[..open], &chars[open..=close])?
        {
            break 'clip split(&chars[..open], &chars[open..=close], ClipStage::Bracket);
        }

        for delim in DELIMITERS {
            let Some(at) = chars.iter().position(|&c| c == delim) else {
                continue;
            };
            if at == 0 || at + 1 == chars.len() {
                continue;
            }
            if fits(&chars[..at], &chars[at + 1..])? {
                break 'clip split(&chars[..at], &chars[at + 1..], ClipStage::Delimiter);
            }
        }

        if let Some(at) = center_space(&chars)
            && at > 0
            && at + 1 < chars.len()
            && fits(&chars[..at], &chars[at + 1..])?
        {
            break 'clip split(&chars[..at], &chars[at + 1..], ClipStage::CenterSpace);
        }

        hard_center_split(&chars)
    };

    tracing::info!(
        stage = ?clipped.stage,
        former_chars = clipped.former.chars().count(),
        latter_chars = clipped.latter.chars().count(),
        width_budget,
        "clipped lyric line"
    );
    Ok(clipped)
}

fn split(former: &[char], latter: &[char], stage: ClipStage) -> ClippedLine {
    ClippedLine {
        former: former.iter().collect(),
        latter: latter.iter().collect(),
        stage,
    }
}

/// Locate `(opener, closer)` of a bracketed clause that ends the line (trailing spaces skipped).
///
/// The opener must leave a non-empty former part.
fn trailing_bracket_clause(chars: &[char]) -> Option<(usize, usize)> {
    let close_at = chars.iter().rposition(|&c| c != ' ')?;
    let (open, close) = BRACKETS
        .iter()
        .copied()
        .find(|&(_, close)| close == chars[close_at])?;
    let open_at = matching_opener(chars, open, close, close_at)?;
    (open_at > 0).then_some((open_at, close_at))
}

/// Stack-match the opener for the closer at `close_at`.
///
/// Only a single unmatched opener counts as a match; nested leftovers or a stray closer mean
/// "no match".
fn matching_opener(chars: &[char], open: char, close: char, close_at: usize) -> Option<usize> {
    let mut stack = Vec::new();
    for (i, &c) in chars[..close_at].iter().enumerate() {
        if c == open {
            stack.push(i);
        } else if c == close {
            stack.pop()?;
        }
    }
    match stack.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// First space at or after the midpoint, else the last space before it.
fn center_space(chars: &[char]) -> Option<usize> {
    let half = chars.len() / 2;
    chars[half..]
        .iter()
        .position(|&c| c == ' ')
        .map(|i| half + i)
        .or_else(|| chars[..half].iter().rposition(|&c| c == ' '))
}

/// Split at `len / 2`, dropping the character just before the midpoint when there is room.
fn hard_center_split(chars: &[char]) -> ClippedLine {
    let half = chars.len() / 2;
    if chars.len() >= 4 {
        split(&chars[..half - 1], &chars[half..], ClipStage::HardCenter)
    } else {
        let cut = half.max(1);
        split(&chars[..cut], &chars[cut..], ClipStage::HardCenter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/clip.rs"]
mod tests;
