//! The element hosting the booking iframe.

use parking_lot::RwLock;

/// Height the booking frame starts at before it reports its own.
pub const INITIAL_HEIGHT: &str = "800px";

/// Hosting element with an inline `height` style.
#[derive(Debug)]
pub struct FrameElement {
    height: RwLock<String>,
}

impl Default for FrameElement {
    fn default() -> Self {
        Self::with_height(INITIAL_HEIGHT)
    }
}

impl FrameElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(height: impl Into<String>) -> Self {
        Self {
            height: RwLock::new(height.into()),
        }
    }

    pub fn height(&self) -> String {
        self.height.read().clone()
    }

    /// Assign the inline height. Returns `true` if the value changed.
    pub fn set_height(&self, height: &str) -> bool {
        let mut current = self.height.write();
        if *current == height {
            return false;
        }
        *current = height.to_owned();
        true
    }
}
