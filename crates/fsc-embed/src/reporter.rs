//! Height reporter — the embedded-page side of the negotiation.
//!
//! The embed page ships this logic as an inline script (see
//! [`crate::snippet::reporter_js`]); the Rust model keeps it testable.
//! Layout changes reach the reporter as explicit observation calls
//! (page load, resize, content swap, theme change) rather than DOM
//! observation; each call carries the freshly measured content height.
//!
//! Delivery is fire-and-forget, at-least-once by nature: a dropped
//! message self-heals on the next layout change. Identical consecutive
//! measurements are deduplicated so steady layouts stay quiet.

use crate::message::EmbedHeightMessage;

/// Per-embed reporter state.
#[derive(Debug, Clone)]
pub struct HeightReporter {
    chart_id: String,
    last_sent: Option<f64>,
}

impl HeightReporter {
    /// Create a reporter bound to one chart id. Nothing has been
    /// reported yet, so the first finite measurement always posts.
    pub fn new(chart_id: &str) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            last_sent: None,
        }
    }

    /// Feed one measured content height (one call per layout event).
    ///
    /// Returns the message to post to the parent window, or `None` when
    /// the measurement is non-finite or identical to the last reported
    /// height.
    pub fn observe(&mut self, measured: f64) -> Option<EmbedHeightMessage> {
        if !measured.is_finite() {
            return None;
        }
        if self.last_sent == Some(measured) {
            return None;
        }
        self.last_sent = Some(measured);
        Some(EmbedHeightMessage::new(&self.chart_id, measured))
    }

    /// Chart id this reporter is bound to.
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }
}
