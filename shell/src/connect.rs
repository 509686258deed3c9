//! Wallet connect section.
//!
//! Two entry points: connect an existing wallet (`Byo`), or create a new
//! embedded wallet by email (`Create`). The chosen [`WalletOptions`] decides
//! which wallets the connect dialog lists. Once connected, the section
//! reports whether the account owns a Lens profile.

use luvpay_types::ChainAddress;
use luvpay_wallet_core::ProfileResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletOptions {
    /// Bring your own wallet.
    Byo,
    /// Create a new wallet.
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletKind {
    MetaMask,
    CoinbaseWallet,
    WalletConnect,
    EmbeddedEmail,
}

impl WalletKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MetaMask => "MetaMask",
            Self::CoinbaseWallet => "Coinbase Wallet",
            Self::WalletConnect => "WalletConnect",
            Self::EmbeddedEmail => "Email",
        }
    }
}

impl WalletOptions {
    /// Wallets listed in the connect dialog for this choice.
    pub fn wallets(&self) -> &'static [WalletKind] {
        match self {
            Self::Byo => &[
                WalletKind::MetaMask,
                WalletKind::CoinbaseWallet,
                WalletKind::WalletConnect,
                WalletKind::EmbeddedEmail,
            ],
            Self::Create => &[WalletKind::EmbeddedEmail],
        }
    }
}

/// One "connect" button and the text above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectEntry {
    pub options: WalletOptions,
    pub prompt: &'static str,
    pub button: &'static str,
}

/// Result of looking up the connected account's own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProfileStatus {
    Found(String),
    NotFound,
}

impl ProfileStatus {
    pub fn message(&self) -> String {
        match self {
            Self::Found(handle) => format!("Found Lens profile: {handle}"),
            Self::NotFound => "No Lens profile found.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectSection {
    session: Option<ChainAddress>,
}

impl ConnectSection {
    pub const WELCOME_TITLE: &'static str = "Connect a wallet to use LUV NFT Pay";

    pub fn new(session: Option<ChainAddress>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> Option<&ChainAddress> {
        self.session.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// The offered entry points. Creating a wallet is only offered while
    /// disconnected.
    pub fn entries(&self) -> Vec<ConnectEntry> {
        let mut entries = vec![ConnectEntry {
            options: WalletOptions::Byo,
            prompt: "I already have my own wallet.",
            button: "Connect Wallet",
        }];
        if !self.is_connected() {
            entries.push(ConnectEntry {
                options: WalletOptions::Create,
                prompt: "I'm new to wallets, I need to create one.",
                button: "Sign up with Email",
            });
        }
        entries
    }

    /// Own-profile status; `None` while disconnected.
    pub async fn profile_status(&self, resolver: &dyn ProfileResolver) -> Option<ProfileStatus> {
        match &self.session {
            Some(address) => Some(lookup_own_profile(resolver, address).await),
            None => None,
        }
    }
}

/// Look up the first profile owned by `address`.
///
/// Lookup failures are logged and reported as [`ProfileStatus::NotFound`].
pub async fn lookup_own_profile(
    resolver: &dyn ProfileResolver,
    address: &ChainAddress,
) -> ProfileStatus {
    match resolver.profiles_owned_by(address).await {
        Ok(profiles) => match profiles.first() {
            Some(profile) => ProfileStatus::Found(profile.display_name().to_string()),
            None => ProfileStatus::NotFound,
        },
        Err(e) => {
            tracing::warn!(%address, error = %e, "own profile lookup failed");
            ProfileStatus::NotFound
        }
    }
}
