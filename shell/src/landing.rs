//! Landing page content and document metadata.

use serde::Serialize;

use crate::route::Route;

pub const LUV_NFT_URL: &str = "https://luvnft.com";

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: &'static str,
    pub target: Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingPage {
    pub badge: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub actions: Vec<Action>,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self {
            badge: "PAY",
            title: "IN LUV WE TRUST",
            tagline: "Send money to anyone in the world in under 4 seconds. No fees.",
            actions: vec![
                Action {
                    label: "SEND",
                    target: Route::Login,
                },
                Action {
                    label: "LUV NFT",
                    target: Route::External(LUV_NFT_URL.to_string()),
                },
            ],
        }
    }
}

/// Page-level metadata (title, description, social preview).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub og_description: &'static str,
    pub url: &'static str,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: "LUV NFT Pay",
            description: "LUV NFT Pay - Send cryptocurrency to one another with ease.",
            keywords: &[
                "LUV NFT Pay",
                "cryptocurrency",
                "send cryptocurrency",
                "digital payments",
            ],
            og_description: "A secure and user-friendly app for sending cryptocurrency.",
            url: "https://pay.luvnft.com",
        }
    }
}
