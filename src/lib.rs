//! Layout and clipping core of a two-line karaoke lyrics overlay.
//!
//! The crate decides *where* lyric lines go; drawing them is left to a rendering shell. Each
//! update turns a lyric pair into a [`LayoutResult`]: visibility flags, the background rect, one
//! rect and one string per text layer, rotation and animation speed.
//!
//! # Pipeline overview
//!
//! 1. **Resolve style**: `OverlayConfig + TextMeasurer -> StyleMetrics` ([`resolve_style`])
//! 2. **Cache geometry**: `ScreenInfo -> ScreenGeometry`
//! 3. **Lay out**: `LyricPair + StyleMetrics + ScreenGeometry -> LayoutResult`
//!    ([`compute_layout`]), splitting an over-wide single line with [`clip_line`] at most once
//! 4. **Roll**: consecutive two-line updates alternate which layer holds the upper line
//!
//! [`OverlayEngine`] ties these together behind the four inbound events (display lyrics, style
//! changed, screen changed, force refresh). It is single-threaded: other threads post
//! [`OverlayEvent`]s through an [`OverlayEventSender`] and the owning thread applies them.
//!
//! Text shaping is injected through [`TextMeasurer`]; [`ParleyMeasurer`] is the bundled
//! implementation and [`FixedAdvanceMeasurer`] a deterministic stand-in.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod engine;
mod foundation;
mod layout;
mod screen;
mod style;
mod text;

pub use config::model::{CLIP_LONG_LINE_STRATEGY, FixedBox, OverlayConfig, WindowBehavior};
pub use engine::events::{OverlayEvent, OverlayEventSender};
pub use engine::overlay::OverlayEngine;
pub use foundation::core::{LayoutMode, Orientation, Point, Rect, Rgba8, Size, Vec2, VerticalSide};
pub use foundation::error::{OverlayError, OverlayResult};
pub use layout::calc::{LayoutContext, LyricPair, compute_layout};
pub use layout::clip::{ClipStage, ClippedLine, clip_line};
pub use layout::result::{
    AnimationSpeeds, BACKGROUND_CORNER_RADIUS, LayerChrome, LayoutResult, LineCase,
};
pub use layout::state::{DisplayState, RollPhase};
pub use screen::{ScreenGeometry, ScreenInfo};
pub use style::resolver::{
    ShadowSpec, StyleMetrics, VERTICAL_PROBE, VERTICAL_PROBE_RATIO, resolve_style,
};
pub use text::measure::{FixedAdvanceMeasurer, StyledText, TextMeasurer};
pub use text::parley_measure::ParleyMeasurer;
pub use text::script::{VerticalForms, is_wide_script};
