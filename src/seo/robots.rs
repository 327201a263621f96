//! Robots directive.

use serde::{Serialize, Serializer};
use std::fmt;

/// Indexing directive built from a single `noIndex`/`noFollow` pair.
///
/// Renders as exactly one of `index, follow`, `index, nofollow`,
/// `noindex, follow`, `noindex, nofollow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Robots {
    no_index: bool,
    no_follow: bool,
}

impl Robots {
    pub const fn from_flags(no_index: bool, no_follow: bool) -> Self {
        Self {
            no_index,
            no_follow,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match (self.no_index, self.no_follow) {
            (false, false) => "index, follow",
            (false, true) => "index, nofollow",
            (true, false) => "noindex, follow",
            (true, true) => "noindex, nofollow",
        }
    }
}

impl fmt::Display for Robots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Robots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
