//! Page selection for a route and session.

use luvpay_types::ChainAddress;
use luvpay_wizard::{BackOutcome, PaymentWizard, WizardError, DEFAULT_SEARCH_DEBOUNCE_MS};

use crate::connect::ConnectSection;
use crate::landing::LandingPage;
use crate::route::Route;

pub const DEFAULT_DASHBOARD_PATH: &str = "/dashboard";

/// What a route renders.
#[derive(Debug)]
pub enum Page {
    Landing(LandingPage),
    /// Not connected: show the wallet connect section instead.
    Connect(ConnectSection),
    Dashboard(ConnectSection),
    Send(Box<PaymentWizard>),
    /// Navigate elsewhere without rendering.
    Redirect(Route),
}

#[derive(Debug, Clone)]
pub struct Shell {
    dashboard_path: String,
    search_debounce_ms: u64,
}

impl Shell {
    pub fn new(dashboard_path: impl Into<String>, search_debounce_ms: u64) -> Self {
        Self {
            dashboard_path: dashboard_path.into(),
            search_debounce_ms,
        }
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    /// Where a route points, with the configured dashboard path.
    pub fn href(&self, route: &Route) -> String {
        match route {
            Route::Dashboard => self.dashboard_path.clone(),
            other => other.path().to_string(),
        }
    }

    /// Choose the page for `route` given the connected account, if any.
    pub fn open(&self, route: &Route, session: Option<&ChainAddress>) -> Page {
        let page = match (route, session) {
            (Route::Home, _) => Page::Landing(LandingPage::default()),
            (Route::Send | Route::Login | Route::Dashboard, None) => {
                Page::Connect(ConnectSection::new(None))
            }
            (Route::Send, Some(address)) => Page::Send(Box::new(
                PaymentWizard::with_search_debounce(address.clone(), self.search_debounce_ms),
            )),
            (Route::Login, Some(_)) => Page::Redirect(Route::Dashboard),
            (Route::Dashboard, Some(address)) => {
                Page::Dashboard(ConnectSection::new(Some(address.clone())))
            }
            (Route::External(_), _) => Page::Redirect(route.clone()),
        };
        tracing::debug!(route = %self.href(route), connected = session.is_some(), "page opened");
        page
    }

    /// Where to go after a back action, if the wizard was exited.
    pub fn after_back(&self, outcome: BackOutcome) -> Option<Route> {
        match outcome {
            BackOutcome::Moved(_) => None,
            BackOutcome::Exit => Some(Route::Dashboard),
        }
    }

    /// Acknowledge a settled payment and leave for the dashboard.
    pub fn go_home(&self, wizard: &mut PaymentWizard) -> Result<Route, WizardError> {
        wizard.go_home()?;
        Ok(Route::Dashboard)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_PATH, DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}
