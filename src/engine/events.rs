use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::{
    config::model::OverlayConfig,
    foundation::error::{OverlayError, OverlayResult},
    screen::ScreenInfo,
};

/// Inbound events, processed one at a time on the engine's thread.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// Show a new lyric pair.
    DisplayLyrics {
        /// Main line; `None` or empty hides the overlay.
        first: Option<String>,
        /// Secondary line.
        second: Option<String>,
    },
    /// Preferences changed; carries the new snapshot.
    StyleChanged(Box<OverlayConfig>),
    /// Screen parameters changed.
    ScreenChanged(ScreenInfo),
    /// Redraw the current lyrics without advancing the roll.
    ForceRefresh,
}

/// Cloneable handle for posting events from any thread.
#[derive(Clone, Debug)]
pub struct OverlayEventSender {
    tx: Sender<OverlayEvent>,
}

impl OverlayEventSender {
    /// Queue an arbitrary event.
    pub fn send(&self, event: OverlayEvent) -> OverlayResult<()> {
        self.tx
            .send(event)
            .map_err(|_| OverlayError::Other(anyhow::anyhow!("overlay engine is gone")))
    }

    /// Queue [`OverlayEvent::DisplayLyrics`].
    pub fn display_lyrics(&self, first: Option<&str>, second: Option<&str>) -> OverlayResult<()> {
        self.send(OverlayEvent::DisplayLyrics {
            first: first.map(str::to_string),
            second: second.map(str::to_string),
        })
    }

    /// Queue [`OverlayEvent::StyleChanged`].
    pub fn style_changed(&self, config: OverlayConfig) -> OverlayResult<()> {
        self.send(OverlayEvent::StyleChanged(Box::new(config)))
    }

    /// Queue [`OverlayEvent::ScreenChanged`].
    pub fn screen_changed(&self, screen: ScreenInfo) -> OverlayResult<()> {
        self.send(OverlayEvent::ScreenChanged(screen))
    }

    /// Queue [`OverlayEvent::ForceRefresh`].
    pub fn force_refresh(&self) -> OverlayResult<()> {
        self.send(OverlayEvent::ForceRefresh)
    }
}

/// Single-consumer event queue owned by the engine.
#[derive(Debug)]
pub(crate) struct EventQueue {
    tx: Sender<OverlayEvent>,
    rx: Receiver<OverlayEvent>,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> OverlayEventSender {
        OverlayEventSender {
            tx: self.tx.clone(),
        }
    }

    /// Take everything queued so far, in arrival order.
    pub(crate) fn drain(&self) -> Vec<OverlayEvent> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => out.push(event),
                // The queue holds its own sender, so it never disconnects.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/events.rs"]
mod tests;
