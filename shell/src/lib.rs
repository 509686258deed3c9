//! LUV NFT Pay presentation shell.
//!
//! Decides which page a route shows for the current session, and carries
//! the static content around the payment wizard: the landing page, the
//! document metadata and the wallet connect section. Navigation is
//! returned as [`Route`] values; the front-end performs it.

pub mod connect;
pub mod error;
pub mod landing;
pub mod route;
pub mod shell;

pub use connect::{
    lookup_own_profile, ConnectEntry, ConnectSection, ProfileStatus, WalletKind, WalletOptions,
};
pub use error::ShellError;
pub use landing::{Action, DocumentMeta, LandingPage, LUV_NFT_URL};
pub use route::Route;
pub use shell::{Page, Shell, DEFAULT_DASHBOARD_PATH};
