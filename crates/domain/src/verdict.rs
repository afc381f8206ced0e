use serde::{Deserialize, Serialize};
use std::fmt;

/// Final per-domain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    UsesCdn,
    NoCdn,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsesCdn => f.write_str("uses-cdn"),
            Self::NoCdn => f.write_str("no-cdn"),
        }
    }
}
