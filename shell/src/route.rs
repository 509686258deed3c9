//! Application routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "url", rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Send,
    Dashboard,
    /// A page outside the app, opened in a new tab.
    External(String),
}

impl Route {
    /// Path (or URL, for external routes) with the default dashboard path.
    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Send => "/send",
            Self::Dashboard => "/dashboard",
            Self::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::External(s.to_string()));
        }
        let trimmed = s.trim_end_matches('/');
        match trimmed {
            "" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/send" => Ok(Self::Send),
            "/dashboard" => Ok(Self::Dashboard),
            _ => Err(ShellError::UnknownRoute(s.to_string())),
        }
    }
}
