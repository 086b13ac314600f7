//! Height listener — the parent-page side of the negotiation.
//!
//! Modeled as a pure, host-driven state machine: the host feeds it raw
//! messages as they arrive on the shared channel and calls
//! [`HeightListener::frame_tick`] once per animation frame, applying
//! the returned height to the iframe. The machine owns no threads,
//! spawns nothing, and never blocks; ordering is simply call order.
//!
//! The generated embed snippet carries the JavaScript rendition of
//! exactly this logic (see [`crate::snippet::listener_js`]).

use serde_json::Value;

use crate::message::{self, DEFAULT_HEIGHT_PX};

/// Per-iframe listener state.
///
/// One listener per iframe binding; the `chart_id` comparison in the
/// validation pipeline is the sole isolation mechanism between multiple
/// embeds on one page. The applied height starts at
/// [`DEFAULT_HEIGHT_PX`], matching the `height` attribute the snippet
/// puts on the iframe.
#[derive(Debug, Clone)]
pub struct HeightListener {
    chart_id: String,
    last_applied_px: u32,
    pending_px: Option<u32>,
}

impl HeightListener {
    /// Create a listener bound to one chart id, at the default height.
    pub fn new(chart_id: &str) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            last_applied_px: DEFAULT_HEIGHT_PX,
            pending_px: None,
        }
    }

    /// Feed one raw message from the shared channel.
    ///
    /// Invalid messages and messages for other bindings are discarded
    /// with no observable effect. Returns true when the message
    /// scheduled (or replaced) a pending height update.
    pub fn handle(&mut self, payload: &Value) -> bool {
        match message::validate(payload, &self.chart_id) {
            Some(height) => self.offer(height),
            None => false,
        }
    }

    /// Schedule a validated height for the next frame.
    ///
    /// Messages arriving before the frame renders coalesce: the most
    /// recent offer wins, no queueing. An offer that clamps to the
    /// already-applied height cancels any pending update instead of
    /// scheduling a no-op, so the most recent write wins even then.
    pub fn offer(&mut self, height: f64) -> bool {
        if !height.is_finite() {
            return false;
        }
        let px = message::clamp_round(height);
        if px == self.last_applied_px {
            self.pending_px = None;
            return false;
        }
        self.pending_px = Some(px);
        true
    }

    /// Animation-frame callback.
    ///
    /// Returns the height to write to the iframe's style, or `None`
    /// when nothing changed since the last frame. At most one style
    /// mutation per tick.
    pub fn frame_tick(&mut self) -> Option<u32> {
        let px = self.pending_px.take()?;
        if px == self.last_applied_px {
            return None;
        }
        self.last_applied_px = px;
        Some(px)
    }

    /// Chart id this listener is bound to.
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    /// Height currently applied to the iframe, in pixels.
    pub fn applied_px(&self) -> u32 {
        self.last_applied_px
    }

    /// Whether an update is scheduled for the next frame.
    pub fn has_pending(&self) -> bool {
        self.pending_px.is_some()
    }
}
