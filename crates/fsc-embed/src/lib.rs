//! fsc-embed — the embed height-negotiation protocol.
//!
//! When a chart is embedded on a third-party page, the embedded page
//! reports its rendered content height to the parent window over the
//! shared message channel, and a listener on the parent page resizes
//! the hosting iframe. This crate is the single source of truth for
//! that protocol:
//!
//! - [`message`] — the wire format, the validation pipeline, and the
//!   clamping rules.
//! - [`listener`] — the parent-page side as a pure, host-driven state
//!   machine (messages in, height applications out).
//! - [`reporter`] — the embedded-page side, deduplicating identical
//!   consecutive measurements.
//! - [`snippet`] — generation of the embed URL, the iframe element, and
//!   the inline scripts that carry the listener and reporter semantics
//!   into the browser.
//!
//! The generated JavaScript mirrors the Rust state machines line for
//! line; behavior changes land here first and the scripts follow.

pub mod listener;
pub mod message;
pub mod reporter;
pub mod snippet;

pub use listener::HeightListener;
pub use message::{
    DEFAULT_HEIGHT_PX, EmbedHeightMessage, MAX_HEIGHT_PX, MESSAGE_TYPE, MIN_HEIGHT_PX,
};
pub use reporter::HeightReporter;
pub use snippet::{
    EmbedSnippet, IframeBinding, SnippetError, embed_url, generate, listener_js, reporter_js,
};
