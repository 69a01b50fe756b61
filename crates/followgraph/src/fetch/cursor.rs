//! Pagination cursor of the follow listing.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Position in a paginated listing.
///
/// The remote encodes the two sentinels as the strings `"-1"` (first page)
/// and `"0"` (no more pages). Everything else is an opaque token that must be
/// echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Request the first page
    Start,
    /// Continue from a token returned by the previous page
    Token(String),
    /// The listing is exhausted
    End,
}

impl Cursor {
    const START: &'static str = "-1";
    const END: &'static str = "0";

    /// Render the cursor as the `cursor` query parameter.
    #[must_use]
    pub fn as_param(&self) -> &str {
        match self {
            Self::Start => Self::START,
            Self::Token(token) => token,
            Self::End => Self::END,
        }
    }

    /// Returns `true` once the listing is exhausted.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(Error::Protocol("empty cursor".to_string())),
            Self::START => Ok(Self::Start),
            Self::END => Ok(Self::End),
            token => Ok(Self::Token(token.to_string())),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}
