//! Social profile records returned by a profile resolver.

use serde::{Deserialize, Serialize};

/// A social-graph identity with a human-readable handle and an owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Resolver-specific profile id (e.g. `0x01a4`).
    pub id: String,
    /// Local handle name, e.g. `jarrodwatts`.
    pub handle: Option<String>,
    /// Owner address exactly as the resolver reported it. Not validated.
    pub owned_by: String,
    /// Optimized avatar URI, if the profile has a picture.
    pub avatar_uri: Option<String>,
}

impl Profile {
    /// Handle if present, otherwise the profile id.
    pub fn display_name(&self) -> &str {
        self.handle.as_deref().unwrap_or(&self.id)
    }

    /// Avatar to render, falling back to the bundled placeholder.
    pub fn avatar_or_default(&self) -> &str {
        self.avatar_uri.as_deref().unwrap_or("/profile.png")
    }
}
