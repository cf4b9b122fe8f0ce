//! The auto-switch state machine.
//!
//! Quicken writes `!Option:AutoSwitch` before a list of `!Account` records
//! that declares every account in the file, and `!Clear:AutoSwitch` after it.
//! From then on each `!Account` section names the account the following
//! transaction sections post against. A second `!Option:AutoSwitch` turns
//! that switching on explicitly.

use std::fmt;

/// Where the reader is in the auto-switch protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AutoSwitch {
    /// No auto-switch literal seen yet.
    #[default]
    Undeclared,
    /// Between `!Option:AutoSwitch` and `!Clear:AutoSwitch`: `!Account`
    /// sections declare the roster.
    Declaring,
    /// After the roster has been declared.
    Idle,
    /// `!Account` sections select the active account.
    Switching,
}

impl AutoSwitch {
    /// The state after an `!Option:AutoSwitch` literal.
    #[must_use]
    pub fn option(self) -> Self {
        let next = match self {
            Self::Undeclared => Self::Declaring,
            Self::Idle => Self::Switching,
            Self::Declaring | Self::Switching => {
                tracing::warn!(state = %self, "auto-switch set twice; switching accounts");
                Self::Switching
            }
        };
        tracing::debug!(from = %self, to = %next, "!Option:AutoSwitch");
        next
    }

    /// The state after a `!Clear:AutoSwitch` literal.
    #[must_use]
    pub fn clear(self) -> Self {
        if self == Self::Undeclared || self == Self::Idle {
            tracing::warn!(state = %self, "auto-switch cleared without being set");
        }
        tracing::debug!(from = %self, to = %Self::Idle, "!Clear:AutoSwitch");
        Self::Idle
    }

    /// Whether `!Account` sections currently declare the roster.
    #[must_use]
    pub const fn is_declaring(self) -> bool {
        matches!(self, Self::Declaring)
    }
}

impl fmt::Display for AutoSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undeclared => "undeclared",
            Self::Declaring => "declaring",
            Self::Idle => "idle",
            Self::Switching => "switching",
        })
    }
}
