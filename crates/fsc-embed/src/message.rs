//! Wire format and validation rules for height messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal type tag every height message must carry.
pub const MESSAGE_TYPE: &str = "FSC_CHART_HEIGHT";

/// Smallest height ever applied to an embed iframe, in pixels.
pub const MIN_HEIGHT_PX: u32 = 200;

/// Largest height ever applied to an embed iframe, in pixels.
pub const MAX_HEIGHT_PX: u32 = 3000;

/// Height an embed iframe starts at before the first report arrives.
pub const DEFAULT_HEIGHT_PX: u32 = 520;

/// Cross-window message posted by an embedded chart page to its parent.
///
/// Serializes to `{"type":"FSC_CHART_HEIGHT","chartId":"…","height":…}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedHeightMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub chart_id: String,
    pub height: f64,
}

impl EmbedHeightMessage {
    pub fn new(chart_id: &str, height: f64) -> Self {
        Self {
            kind: MESSAGE_TYPE.to_string(),
            chart_id: chart_id.to_string(),
            height,
        }
    }
}

/// Run the validation pipeline over a raw message payload.
///
/// Returns the height only when every condition holds: the payload is a
/// non-null structured object, its `type` equals the literal tag, its
/// `chartId` equals the bound `chart_id`, and its `height` is a finite
/// number. Any failure is a silent discard — the channel carries
/// unrelated traffic from other code on the page, so rejections must
/// not be observable, not even as a log line.
pub fn validate(payload: &Value, chart_id: &str) -> Option<f64> {
    let obj = payload.as_object()?;
    if obj.get("type")?.as_str()? != MESSAGE_TYPE {
        return None;
    }
    if obj.get("chartId")?.as_str()? != chart_id {
        return None;
    }
    let height = obj.get("height")?.as_f64()?;
    if !height.is_finite() {
        return None;
    }
    Some(height)
}

/// Clamp a validated height to `[MIN_HEIGHT_PX, MAX_HEIGHT_PX]` and
/// round to whole pixels.
pub fn clamp_round(height: f64) -> u32 {
    height
        .clamp(MIN_HEIGHT_PX as f64, MAX_HEIGHT_PX as f64)
        .round() as u32
}
