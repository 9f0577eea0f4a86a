//! Walk state definitions for the pagination state machine
//!
//! Each page moves through `Fetching -> Parsing -> Extracting -> LocatingNext`
//! and ends in either `Continuing` (another page follows) or `Terminal`.

use std::fmt;

/// Represents the current phase of the pagination walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    // ===== Per-Page States =====
    /// The current page is being requested
    Fetching,

    /// The fetched content is being parsed into a document
    Parsing,

    /// Catalog entries are being turned into records
    Extracting,

    /// The next-page link is being located
    LocatingNext,

    // ===== Between Pages =====
    /// The cursor moved to another page which has not been fetched yet
    Continuing,

    // ===== Final State =====
    /// The walk is over
    Terminal,
}

impl WalkState {
    /// Returns true if the walk is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Returns true if the state machine allows moving from `self` to `next`
    ///
    /// A failed fetch or parse jumps straight to `Continuing` (the page is
    /// skipped) or `Terminal`. Outer bounds may end the walk while the cursor
    /// waits in `Continuing` or before the first fetch.
    pub fn can_transition_to(&self, next: WalkState) -> bool {
        use WalkState::*;

        matches!(
            (self, next),
            (Fetching, Parsing)
                | (Fetching, Continuing)
                | (Fetching, Terminal)
                | (Parsing, Extracting)
                | (Parsing, Continuing)
                | (Parsing, Terminal)
                | (Extracting, LocatingNext)
                | (LocatingNext, Continuing)
                | (LocatingNext, Terminal)
                | (Continuing, Fetching)
                | (Continuing, Terminal)
        )
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Extracting => "extracting",
            Self::LocatingNext => "locating_next",
            Self::Continuing => "continuing",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The last page had no next-page link
    EndOfCatalog,

    /// The start page could not be fetched or parsed
    FirstPageFailed,

    /// A later page failed and no next page could be predicted, or too many
    /// pages failed in a row
    PageFailure,

    /// The configured page limit was reached
    MaxPages,

    /// The walk deadline passed
    Deadline,

    /// A next-page link pointed back to an already visited page
    Cycle,
}

impl StopReason {
    /// Returns true if the walk covered the catalog up to its natural end
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::EndOfCatalog)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfCatalog => "end_of_catalog",
            Self::FirstPageFailed => "first_page_failed",
            Self::PageFailure => "page_failure",
            Self::MaxPages => "max_pages",
            Self::Deadline => "deadline",
            Self::Cycle => "cycle",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
