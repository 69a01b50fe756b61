//! Authenticated browser session replayed against the listing endpoint.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Request headers and cookies copied from a logged-in browser.
///
/// Loaded from a YAML file of the form:
///
/// ```yaml
/// headers:
///   x-csrf-token: "..."
///   authorization: "Bearer ..."
/// cookies:
///   auth_token: "..."
///   ct0: "..."
/// ```
///
/// Values are credentials, so `Debug` prints only the names.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

impl Session {
    /// Read a session file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not a valid session document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read session file {}: {e}", path.display()),
            ))
        })?;
        Self::from_yaml(&text)
            .map_err(|e| Error::Config(format!("session file {}: {e}", path.display())))
    }

    fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Cookies joined into a single `Cookie` header value, if there are any.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}
