//! Embed snippet generation.
//!
//! Builds the iframe element and inline listener script a third-party
//! site operator pastes into their page, plus the reporter script the
//! embed page itself ships. Unlike the listener, snippet generation is
//! a server-side concern and fails loudly with typed errors.

use fsc_core::{ChartId, EmbedOptions, flag_str, html_escape};
use thiserror::Error;

use crate::message::{DEFAULT_HEIGHT_PX, MAX_HEIGHT_PX, MESSAGE_TYPE, MIN_HEIGHT_PX};

/// Errors surfaced while generating an embed snippet.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("base URL must start with http:// or https://, got {0:?}")]
    BadBaseUrl(String),

    #[error("invalid {name} value {value:?}: expected lowercase kebab-case")]
    BadParam { name: &'static str, value: String },
}

/// Association between one iframe element, its stable element id, and
/// the chart it displays. Created when the snippet is generated; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IframeBinding {
    pub chart_id: ChartId,
    pub iframe_id: String,
}

impl IframeBinding {
    pub fn new(chart_id: ChartId) -> Self {
        let iframe_id = format!("fsc-embed-{chart_id}");
        Self {
            chart_id,
            iframe_id,
        }
    }
}

/// A generated embed snippet.
#[derive(Debug, Clone)]
pub struct EmbedSnippet {
    pub binding: IframeBinding,
    /// The embed page URL the iframe points at.
    pub url: String,
    /// The full paste-ready HTML: iframe plus inline listener script.
    pub html: String,
}

/// Generate the embed snippet for one chart.
///
/// `title` becomes the iframe's accessible title; pass the chart title
/// from the registry.
pub fn generate(
    base_url: &str,
    chart_id: &ChartId,
    title: &str,
    options: &EmbedOptions,
) -> Result<EmbedSnippet, SnippetError> {
    let binding = IframeBinding::new(chart_id.clone());
    let url = embed_url(base_url, chart_id, options)?;
    let script = listener_js(&binding);
    let html = format!(
        "<iframe id=\"{id}\" src=\"{src}\" title=\"{title}\" height=\"{height}\" \
         loading=\"lazy\" style=\"width:100%;border:0;display:block;\"></iframe>\n\
         <script>\n{script}</script>\n",
        id = binding.iframe_id,
        src = html_escape(&url),
        title = html_escape(title),
        height = DEFAULT_HEIGHT_PX,
    );
    Ok(EmbedSnippet { binding, url, html })
}

/// Build the embed URL, carrying only parameters that differ from the
/// embed page's defaults.
pub fn embed_url(
    base_url: &str,
    chart_id: &ChartId,
    options: &EmbedOptions,
) -> Result<String, SnippetError> {
    let base = check_base_url(base_url)?;
    let mut params: Vec<String> = Vec::new();
    if let Some(filter) = &options.filter {
        check_param("filter", filter)?;
        params.push(format!("filter={filter}"));
    }
    if let Some(view) = &options.view {
        check_param("view", view)?;
        params.push(format!("view={view}"));
    }
    if !options.show_title {
        params.push(format!("showTitle={}", flag_str(false)));
    }
    if !options.show_source {
        params.push(format!("showSource={}", flag_str(false)));
    }
    if let Some(theme) = options.theme {
        params.push(format!("theme={theme}"));
    }
    if options.compact {
        params.push(format!("compact={}", flag_str(true)));
    }

    let mut url = format!("{base}/embed/{chart_id}");
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
    Ok(url)
}

/// The inline listener script, scoped to one binding.
///
/// This is the JavaScript rendition of [`crate::listener::HeightListener`];
/// the two must stay in lockstep. It validates each message, clamps and
/// rounds the height, and coalesces rapid messages into one style write
/// per animation frame, most recent wins. Invalid messages return
/// without any side effect so the host page's console stays clean.
pub fn listener_js(binding: &IframeBinding) -> String {
    format!(
        r#"(function () {{
  var frame = document.getElementById("{id}");
  if (!frame) return;
  var last = {default};
  var pending = null;
  var scheduled = false;
  function apply() {{
    scheduled = false;
    if (pending !== null && pending !== last) {{
      last = pending;
      frame.style.height = pending + "px";
    }}
    pending = null;
  }}
  window.addEventListener("message", function (event) {{
    var data = event.data;
    if (typeof data !== "object" || data === null) return;
    if (data.type !== "{tag}") return;
    if (data.chartId !== "{chart_id}") return;
    if (typeof data.height !== "number" || !isFinite(data.height)) return;
    var px = Math.round(Math.min({max}, Math.max({min}, data.height)));
    if (px === last) {{ pending = null; return; }}
    pending = px;
    if (!scheduled) {{
      scheduled = true;
      window.requestAnimationFrame(apply);
    }}
  }});
}})();
"#,
        id = binding.iframe_id,
        chart_id = binding.chart_id,
        tag = MESSAGE_TYPE,
        default = DEFAULT_HEIGHT_PX,
        min = MIN_HEIGHT_PX,
        max = MAX_HEIGHT_PX,
    )
}

/// The inline reporter script the embed page ships.
///
/// JavaScript rendition of [`crate::reporter::HeightReporter`]. Layout
/// changes arrive through explicit subscriptions (load, resize, a
/// ResizeObserver on the document element, and the color-scheme media
/// query); identical consecutive heights are not re-posted. Pages
/// opened directly rather than in an iframe post nothing.
pub fn reporter_js(chart_id: &ChartId) -> String {
    format!(
        r#"(function () {{
  if (window.parent === window) return;
  var lastSent = null;
  function measure() {{
    var doc = document.documentElement;
    var body = document.body;
    return Math.max(doc.scrollHeight, body ? body.scrollHeight : 0);
  }}
  function report() {{
    var h = measure();
    if (!isFinite(h) || h === lastSent) return;
    lastSent = h;
    window.parent.postMessage(
      {{ type: "{tag}", chartId: "{chart_id}", height: h }},
      "*"
    );
  }}
  window.addEventListener("load", report);
  window.addEventListener("resize", report);
  if (window.ResizeObserver) {{
    new ResizeObserver(report).observe(document.documentElement);
  }}
  if (window.matchMedia) {{
    var scheme = window.matchMedia("(prefers-color-scheme: dark)");
    if (scheme.addEventListener) {{
      scheme.addEventListener("change", report);
    }}
  }}
  report();
}})();
"#,
        tag = MESSAGE_TYPE,
        chart_id = chart_id,
    )
}

fn check_base_url(raw: &str) -> Result<&str, SnippetError> {
    let trimmed = raw.trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SnippetError::BadBaseUrl(raw.to_string()));
    }
    Ok(trimmed)
}

/// Filter and view values travel verbatim in URLs and generated HTML,
/// so they must have the same kebab-case shape as chart ids.
fn check_param(name: &'static str, value: &str) -> Result<(), SnippetError> {
    if ChartId::parse(value).is_err() {
        return Err(SnippetError::BadParam {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}
