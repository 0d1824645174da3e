use crate::{
    config::model::{OverlayConfig, WindowBehavior},
    engine::events::{EventQueue, OverlayEvent, OverlayEventSender},
    foundation::error::OverlayResult,
    layout::{
        calc::{LayoutContext, LyricPair, compute_layout, hidden_layout},
        result::LayoutResult,
        state::DisplayState,
    },
    screen::{ScreenGeometry, ScreenInfo},
    style::resolver::{StyleMetrics, resolve_style},
    text::measure::TextMeasurer,
};

/// The lyrics overlay core: cached style, geometry and display state plus the last lyric pair.
///
/// Everything runs synchronously on the thread that owns the engine. Other threads post
/// [`OverlayEvent`]s through [`OverlayEngine::event_sender`]; the owner applies them with
/// [`OverlayEngine::pump_events`].
pub struct OverlayEngine<M: TextMeasurer> {
    config: OverlayConfig,
    measurer: M,
    /// `None` after a failed style rebuild; the overlay stays hidden until one succeeds.
    style: Option<StyleMetrics>,
    geometry: ScreenGeometry,
    state: DisplayState,
    lyrics: LyricPair,
    last_layout: Option<LayoutResult>,
    events: EventQueue,
}

impl<M: TextMeasurer> std::fmt::Debug for OverlayEngine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayEngine")
            .field("style", &self.style)
            .field("geometry", &self.geometry)
            .field("state", &self.state)
            .field("lyrics", &self.lyrics)
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasurer> OverlayEngine<M> {
    /// Resolve style and geometry, then lay out the startup text.
    pub fn new(config: OverlayConfig, mut measurer: M, screen: &ScreenInfo) -> OverlayResult<Self> {
        tracing::info!("init lyrics overlay");
        let style = resolve_style(&config, &mut measurer)?;
        let geometry = ScreenGeometry::from_screen(screen)?;
        log_geometry(&geometry);

        let startup = config.startup_text.clone();
        let mut engine = Self {
            config,
            measurer,
            style: Some(style),
            geometry,
            state: DisplayState::default(),
            lyrics: LyricPair::default(),
            last_layout: None,
            events: EventQueue::new(),
        };
        engine.display_lyrics(Some(startup.as_str()), None)?;
        Ok(engine)
    }

    /// Replace the lyric pair and lay it out.
    #[tracing::instrument(skip(self))]
    pub fn display_lyrics(
        &mut self,
        first: Option<&str>,
        second: Option<&str>,
    ) -> OverlayResult<LayoutResult> {
        self.lyrics = LyricPair::new(first, second);
        self.relayout()
    }

    /// Apply a new preference snapshot and redraw the current lyrics.
    ///
    /// On a configuration error the overlay is hidden (see [`OverlayEngine::last_layout`]) and
    /// the error is returned; lyrics keep being cached until a valid style arrives.
    pub fn on_style_changed(&mut self, config: OverlayConfig) -> OverlayResult<LayoutResult> {
        self.config = config;
        match resolve_style(&self.config, &mut self.measurer) {
            Ok(style) => {
                // Leaving the hidden state: nothing on screen to keep in place.
                if self.style.replace(style).is_none() {
                    return self.relayout();
                }
                self.on_force_refresh()
            }
            Err(err) => {
                tracing::warn!(%err, "style rebuild failed; hiding overlay");
                self.style = None;
                let hidden = hidden_layout(&mut self.state, self.geometry.window_frame);
                self.last_layout = Some(hidden);
                Err(err)
            }
        }
    }

    /// Rebuild geometry from new screen facts and redraw the current lyrics.
    pub fn on_screen_geometry_changed(
        &mut self,
        screen: &ScreenInfo,
    ) -> OverlayResult<LayoutResult> {
        self.geometry = ScreenGeometry::from_screen(screen)?;
        log_geometry(&self.geometry);
        self.on_force_refresh()
    }

    /// Redraw the last lyric pair in its current roll position.
    ///
    /// The roll flag is flipped once here so the two-line layout's own flip lands back on the
    /// phase that is already on screen.
    pub fn on_force_refresh(&mut self) -> OverlayResult<LayoutResult> {
        self.state.rolling_over = !self.state.rolling_over;
        self.relayout()
    }

    /// Apply one event to completion.
    pub fn dispatch(&mut self, event: OverlayEvent) -> OverlayResult<LayoutResult> {
        match event {
            OverlayEvent::DisplayLyrics { first, second } => {
                self.display_lyrics(first.as_deref(), second.as_deref())
            }
            OverlayEvent::StyleChanged(config) => self.on_style_changed(*config),
            OverlayEvent::ScreenChanged(screen) => self.on_screen_geometry_changed(&screen),
            OverlayEvent::ForceRefresh => self.on_force_refresh(),
        }
    }

    /// Apply every queued event in arrival order; one result per event.
    pub fn pump_events(&mut self) -> Vec<OverlayResult<LayoutResult>> {
        self.events
            .drain()
            .into_iter()
            .map(|event| self.dispatch(event))
            .collect()
    }

    /// Handle for posting events from other threads.
    pub fn event_sender(&self) -> OverlayEventSender {
        self.events.sender()
    }

    /// Most recent layout handed to the renderer.
    pub fn last_layout(&self) -> Option<&LayoutResult> {
        self.last_layout.as_ref()
    }

    /// Lyric pair currently displayed (after any clipping).
    pub fn lyrics(&self) -> &LyricPair {
        &self.lyrics
    }

    /// Current display flags.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Resolved style, if the last rebuild succeeded.
    pub fn style(&self) -> Option<&StyleMetrics> {
        self.style.as_ref()
    }

    /// Cached screen geometry.
    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    /// Current preference snapshot.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Window flags for the shell.
    pub fn window_behavior(&self) -> WindowBehavior {
        self.config.window_behavior()
    }

    fn relayout(&mut self) -> OverlayResult<LayoutResult> {
        let result = match &self.style {
            Some(style) => {
                let ctx = LayoutContext {
                    config: &self.config,
                    style,
                    geometry: &self.geometry,
                };
                compute_layout(&mut self.lyrics, ctx, &mut self.state, &mut self.measurer)?
            }
            None => hidden_layout(&mut self.state, self.geometry.window_frame),
        };
        self.last_layout = Some(result.clone());
        Ok(result)
    }
}

fn log_geometry(geometry: &ScreenGeometry) {
    tracing::info!(
        width = geometry.visible_size.width,
        height = geometry.visible_size.height,
        x = geometry.visible_origin.x,
        y = geometry.visible_origin.y,
        "screen visible area changed"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/engine/overlay.rs"]
mod tests;
