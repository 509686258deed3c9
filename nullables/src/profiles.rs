//! Nullable profile resolver: in-memory profiles, recorded queries.

use std::sync::Mutex;

use async_trait::async_trait;
use luvpay_types::{ChainAddress, Profile};
use luvpay_wallet_core::{ProfileResolver, WalletError};

/// An in-memory profile resolver for testing.
///
/// Search is a case-insensitive substring match on the handle.
pub struct NullProfileResolver {
    profiles: Mutex<Vec<Profile>>,
    queries: Mutex<Vec<String>>,
    error: Mutex<Option<String>>,
}

impl NullProfileResolver {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            queries: Mutex::new(Vec::new()),
            error: Mutex::new(None),
        }
    }

    pub fn add(&self, profile: Profile) {
        self.profiles.lock().unwrap().push(profile);
    }

    /// Make every call fail with `message` until cleared.
    pub fn fail_with(&self, message: Option<&str>) {
        *self.error.lock().unwrap() = message.map(str::to_string);
    }

    /// Every search query received so far (for assertions).
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn check_error(&self) -> Result<(), WalletError> {
        match self.error.lock().unwrap().clone() {
            Some(message) => Err(WalletError::Resolver(message)),
            None => Ok(()),
        }
    }
}

impl Default for NullProfileResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ProfileResolver for NullProfileResolver {
    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, WalletError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.check_error()?;
        let needle = query.to_lowercase();
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.handle
                    .as_deref()
                    .is_some_and(|h| h.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn profiles_owned_by(&self, address: &ChainAddress) -> Result<Vec<Profile>, WalletError> {
        self.check_error()?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| address.matches(&p.owned_by))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, handle: &str, owner: &str) -> Profile {
        Profile {
            id: id.into(),
            handle: Some(handle.into()),
            owned_by: owner.into(),
            avatar_uri: None,
        }
    }

    const OWNER: &str = "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa";

    #[tokio::test]
    async fn search_matches_handle_substring() {
        let resolver = NullProfileResolver::new(vec![
            profile("0x01", "jarrodwatts", OWNER),
            profile("0x02", "stani", OWNER),
        ]);
        let found = resolver.search_profiles("JARROD").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "0x01");
        assert_eq!(resolver.queries(), vec!["JARROD".to_string()]);
    }

    #[tokio::test]
    async fn owned_by_ignores_case() {
        let resolver = NullProfileResolver::new(vec![profile("0x01", "wallaby", OWNER)]);
        let owner = ChainAddress::parse(OWNER.to_lowercase()).unwrap();
        assert_eq!(resolver.profiles_owned_by(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn scripted_failure() {
        let resolver = NullProfileResolver::default();
        resolver.fail_with(Some("rate limited"));
        assert!(resolver.search_profiles("a").await.is_err());
        resolver.fail_with(None);
        assert!(resolver.search_profiles("a").await.unwrap().is_empty());
    }
}
