//! Resize bridge for the embedded booking frame.
//!
//! The booking iframe reports its content height through penpal-style call
//! envelopes posted to the host window:
//!
//! ```json
//! { "penpal": "call", "methodName": "resize", "args": [812] }
//! ```
//!
//! While mounted, the bridge applies the first argument to the hosting
//! element's height (`812px`). Every other message is ignored.
//!
//! # Module Structure
//!
//! ```text
//! bridge/
//! ├── channel    # MessageChannel, MessageEvent, ListenerId
//! ├── embed      # booking iframe markup
//! └── frame      # FrameElement (hosting element)
//! ```

pub mod channel;
pub mod embed;
pub mod frame;

pub use channel::{ListenerId, MessageChannel, MessageEvent};
pub use embed::render_embed;
pub use frame::FrameElement;

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

use crate::debug;

/// Envelope marker used by the booking frame's messaging library.
pub const DEFAULT_MARKER: &str = "penpal";

/// Decides which messages are resize calls.
#[derive(Debug, Clone)]
pub struct ResizeFilter {
    marker: String,
    /// Accepted sender origins (`scheme://host[:port]`). `None` accepts any.
    allowed_origins: Option<Vec<String>>,
}

impl Default for ResizeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl ResizeFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            allowed_origins: None,
        }
    }

    /// Only accept messages whose origin matches one of `origins`.
    pub fn allow_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_origins = Some(
            origins
                .into_iter()
                .map(|o| normalize_origin(o.as_ref()))
                .collect(),
        );
        self
    }

    /// Height to apply for this event, or `None` to ignore it.
    pub fn height_for(&self, event: &MessageEvent) -> Option<String> {
        if let Some(allowed) = &self.allowed_origins
            && !allowed.contains(&normalize_origin(&event.origin))
        {
            debug!("frame"; "ignored message from origin {}", event.origin);
            return None;
        }

        let data = event.data.as_object()?;
        if data.get(&self.marker).and_then(Value::as_str) != Some("call")
            || data.get("methodName").and_then(Value::as_str) != Some("resize")
        {
            return None;
        }

        let Some(height) = data
            .get("args")
            .and_then(Value::as_array)
            .and_then(|args| args.first())
            .and_then(css_pixels)
        else {
            debug!("frame"; "resize call without a numeric height: {}", event.data);
            return None;
        };
        Some(height)
    }
}

/// JSON number → `"<n>px"`; integral values print without a fraction.
fn css_pixels(value: &Value) -> Option<String> {
    if let Some(n) = value.as_i64() {
        return Some(format!("{n}px"));
    }
    let n = value.as_f64().filter(|n| n.is_finite())?;
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Some(format!("{}px", n as i64))
    } else {
        Some(format!("{n}px"))
    }
}

/// `https://Media.Example.com/order` → `https://media.example.com`.
///
/// Strings that are not URLs are compared verbatim.
pub fn normalize_origin(origin: &str) -> String {
    match Url::parse(origin) {
        Ok(url) => url.origin().ascii_serialization(),
        Err(_) => origin.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    Listening(ListenerId),
}

/// Listener that keeps a [`FrameElement`] sized to its content.
///
/// `mount`/`unmount` mirror the hosting component's lifecycle and are both
/// idempotent. Dropping a mounted bridge unmounts it.
pub struct ResizeBridge {
    channel: Arc<MessageChannel>,
    frame: Arc<FrameElement>,
    filter: Arc<ResizeFilter>,
    state: Mutex<BridgeState>,
}

impl ResizeBridge {
    pub fn new(channel: Arc<MessageChannel>, frame: Arc<FrameElement>, filter: ResizeFilter) -> Self {
        Self {
            channel,
            frame,
            filter: Arc::new(filter),
            state: Mutex::new(BridgeState::Idle),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> BridgeState {
        *self.state.lock()
    }

    pub fn frame(&self) -> &FrameElement {
        &self.frame
    }

    pub fn mount(&self) {
        let mut state = self.state.lock();
        if matches!(*state, BridgeState::Listening(_)) {
            return;
        }

        let frame = Arc::clone(&self.frame);
        let filter = Arc::clone(&self.filter);
        let id = self.channel.subscribe(move |event| {
            if let Some(height) = filter.height_for(event)
                && frame.set_height(&height)
            {
                debug!("frame"; "height -> {}", height);
            }
        });
        *state = BridgeState::Listening(id);
    }

    pub fn unmount(&self) {
        let mut state = self.state.lock();
        if let BridgeState::Listening(id) = *state {
            self.channel.unsubscribe(id);
            *state = BridgeState::Idle;
        }
    }
}

impl Drop for ResizeBridge {
    fn drop(&mut self) {
        self.unmount();
    }
}
