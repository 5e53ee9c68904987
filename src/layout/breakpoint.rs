use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Responsive viewport tier. Ordered widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs];

    /// Grid column count.
    pub fn cols(self) -> u32 {
        match self {
            Breakpoint::Lg => 3,
            Breakpoint::Md | Breakpoint::Sm => 2,
            Breakpoint::Xs => 1,
        }
    }

    /// Viewport width in pixels at which this tier starts.
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
        }
    }

    /// Widest tier whose threshold `width` reaches. Anything narrower than
    /// every threshold is `Xs`.
    pub fn for_width(width: u32) -> Breakpoint {
        Self::ALL
            .into_iter()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Xs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown breakpoint {0:?} (expected lg, md, sm or xs)")]
pub struct UnknownBreakpoint(pub String);

impl FromStr for Breakpoint {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bp| bp.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBreakpoint(s.to_string()))
    }
}
