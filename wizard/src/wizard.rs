//! The payment wizard state machine.

use luvpay_types::{ChainAddress, Profile, Timestamp, TokenAmount, TokenId, TxHash};
use luvpay_wallet_core::{ProfileResolver, WalletSession};

use crate::error::{Event, ValidationError, WizardError};
use crate::search::{ProfileSearch, SearchRequest, SearchView, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::state::{
    Phase, RecipientMode, RecipientSelection, Step, SubmissionResult, WizardState,
};
use crate::validation::{accepts_amount_input, validate_address, validate_amount};

/// The exact call the wizard wants made to the transfer primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: ChainAddress,
    pub amount: String,
    pub token: TokenId,
}

/// Result of a back action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Stayed in the wizard, now at this step.
    Moved(Step),
    /// Backed out of the root; the caller should navigate away.
    Exit,
}

/// What the confirm screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmSummary {
    pub amount: String,
    pub to: ChainAddress,
    pub profile_name: Option<String>,
}

/// A single payment attempt for one connected session.
///
/// The session address is passed in explicitly and fixed for the lifetime
/// of the wizard; a new session means a new wizard.
#[derive(Debug, Clone)]
pub struct PaymentWizard {
    session_address: ChainAddress,
    state: WizardState,
    address_draft: String,
    address_error: Option<ValidationError>,
    amount_draft: String,
    amount_error: Option<ValidationError>,
    search: ProfileSearch,
}

impl PaymentWizard {
    pub fn new(session_address: ChainAddress) -> Self {
        Self::with_search_debounce(session_address, DEFAULT_SEARCH_DEBOUNCE_MS)
    }

    pub fn with_search_debounce(session_address: ChainAddress, debounce_ms: u64) -> Self {
        Self {
            session_address,
            state: WizardState::new(),
            address_draft: String::new(),
            address_error: None,
            amount_draft: String::new(),
            amount_error: None,
            search: ProfileSearch::new(debounce_ms),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn session_address(&self) -> &ChainAddress {
        &self.session_address
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn address_draft(&self) -> &str {
        &self.address_draft
    }

    pub fn address_error(&self) -> Option<&ValidationError> {
        self.address_error.as_ref()
    }

    pub fn amount_draft(&self) -> &str {
        &self.amount_draft
    }

    pub fn amount_error(&self) -> Option<&ValidationError> {
        self.amount_error.as_ref()
    }

    pub fn search(&self) -> &ProfileSearch {
        &self.search
    }

    pub fn search_view(&self) -> SearchView<'_> {
        self.search.view()
    }

    pub fn submission(&self) -> Option<&SubmissionResult> {
        self.state.submission.as_ref()
    }

    /// Populated from the confirm step onward.
    pub fn confirm_summary(&self) -> Option<ConfirmSummary> {
        let recipient = self.state.recipient.as_ref()?;
        let amount = self.state.amount.as_ref()?;
        Some(ConfirmSummary {
            amount: amount.raw.clone(),
            to: recipient.address().clone(),
            profile_name: recipient.profile_name().map(str::to_string),
        })
    }

    fn require(&self, event: Event, allowed: &[Step]) -> Result<Step, WizardError> {
        let step = self.step();
        if allowed.contains(&step) {
            Ok(step)
        } else {
            Err(WizardError::InvalidTransition { event, step })
        }
    }

    fn enter(&mut self, phase: Phase) {
        let from = self.step();
        self.state.phase = phase;
        tracing::debug!(%from, to = %self.step(), "wizard transition");
    }

    // ── Phase 0: recipient ──────────────────────────────────────────────

    pub fn choose_mode(&mut self, mode: RecipientMode) -> Result<(), WizardError> {
        self.require(Event::ChooseMode, &[Step::SelectRecipientMode])?;
        self.address_draft.clear();
        self.address_error = None;
        self.state.recipient_mode = Some(mode);
        tracing::debug!(mode = mode.label(), "recipient mode chosen");
        Ok(())
    }

    pub fn edit_address(&mut self, raw: impl Into<String>) {
        self.address_draft = raw.into();
    }

    pub fn submit_address(&mut self) -> Result<(), WizardError> {
        self.require(Event::SubmitAddress, &[Step::EnterAddress])?;
        match validate_address(&self.address_draft, &self.session_address) {
            Ok(value) => {
                self.address_error = None;
                self.state.recipient = Some(RecipientSelection::Address { value });
                self.enter(Phase::Amount);
                Ok(())
            }
            Err(err) => {
                self.address_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    pub fn edit_search(&mut self, query: impl Into<String>, now: Timestamp) -> Result<(), WizardError> {
        self.require(Event::EditSearch, &[Step::SearchProfile])?;
        self.search.edit(query, now);
        Ok(())
    }

    /// When the pending search becomes due, if one is pending.
    pub fn search_deadline(&self) -> Option<Timestamp> {
        if self.step() != Step::SearchProfile {
            return None;
        }
        self.search.deadline()
    }

    /// Dispatch the debounced search if it is due.
    pub fn poll_search(&mut self, now: Timestamp) -> Option<SearchRequest> {
        if self.step() != Step::SearchProfile {
            return None;
        }
        self.search.poll(now)
    }

    /// Deliver a resolver response; `false` if it was stale.
    pub fn apply_search_results(
        &mut self,
        seq: u64,
        outcome: Result<Vec<Profile>, String>,
    ) -> bool {
        if self.step() != Step::SearchProfile {
            return false;
        }
        self.search.accept(seq, outcome)
    }

    pub fn pick_candidate(&mut self, profile: &Profile) -> Result<(), WizardError> {
        self.require(Event::PickCandidate, &[Step::SearchProfile])?;
        let resolved_address = validate_address(&profile.owned_by, &self.session_address)?;
        self.state.recipient = Some(RecipientSelection::Profile {
            profile_id: profile.id.clone(),
            resolved_address,
            display_name: profile.display_name().to_string(),
        });
        self.enter(Phase::Amount);
        Ok(())
    }

    // ── Phase 1: amount ─────────────────────────────────────────────────

    /// Replace the amount draft. Returns `false` (draft unchanged) for
    /// negative or overlong input.
    pub fn edit_amount(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if !accepts_amount_input(&raw) {
            return false;
        }
        self.amount_draft = raw;
        true
    }

    pub fn submit_amount(&mut self, available: &TokenAmount) -> Result<(), WizardError> {
        self.require(Event::SubmitAmount, &[Step::EnterAmount])?;
        match validate_amount(&self.amount_draft, available) {
            Ok(selection) => {
                self.amount_error = None;
                self.state.amount = Some(selection);
                self.enter(Phase::Confirm);
                Ok(())
            }
            Err(err) => {
                self.amount_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    // ── Phase 2: confirm ────────────────────────────────────────────────

    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.require(Event::Cancel, &[Step::Confirm])?;
        self.state.amount = None;
        self.state.recipient = None;
        self.state.recipient_mode = None;
        self.address_draft.clear();
        self.amount_draft.clear();
        self.address_error = None;
        self.amount_error = None;
        self.search.clear();
        self.enter(Phase::Recipient);
        Ok(())
    }

    /// Move to Submitting and hand back the transfer to issue.
    pub fn confirm(&mut self) -> Result<TransferRequest, WizardError> {
        self.require(Event::Confirm, &[Step::Confirm])?;
        let request = self.transfer_request(Event::Confirm)?;
        self.state.submission = Some(SubmissionResult::Pending);
        self.enter(Phase::Send);
        Ok(request)
    }

    fn transfer_request(&self, event: Event) -> Result<TransferRequest, WizardError> {
        match (&self.state.recipient, &self.state.amount) {
            (Some(recipient), Some(amount)) => Ok(TransferRequest {
                to: recipient.address().clone(),
                amount: amount.raw.clone(),
                token: TokenId::Native,
            }),
            _ => Err(WizardError::InvalidTransition {
                event,
                step: self.step(),
            }),
        }
    }

    // ── Phase 3: submission ─────────────────────────────────────────────

    /// Record the outcome of the in-flight transfer.
    pub fn settle(&mut self, outcome: Result<TxHash, String>) -> Result<(), WizardError> {
        self.require(Event::Settle, &[Step::Submitting])?;
        let result = match outcome {
            Ok(tx_hash) => {
                tracing::info!(%tx_hash, "payment succeeded");
                SubmissionResult::Success { tx_hash }
            }
            Err(error) => {
                tracing::warn!(%error, "payment failed");
                SubmissionResult::Failure { error }
            }
        };
        self.state.submission = Some(result);
        Ok(())
    }

    /// From a failure, go back to Submitting with the identical request.
    pub fn retry(&mut self) -> Result<TransferRequest, WizardError> {
        self.require(Event::Retry, &[Step::Failed])?;
        let request = self.transfer_request(Event::Retry)?;
        self.state.submission = Some(SubmissionResult::Pending);
        tracing::debug!("retrying payment");
        Ok(request)
    }

    /// Confirm and run the transfer to completion.
    pub async fn submit(
        &mut self,
        session: &dyn WalletSession,
    ) -> Result<&SubmissionResult, WizardError> {
        let request = self.confirm()?;
        self.run_transfer(session, request).await
    }

    /// Retry a failed transfer and run it to completion.
    pub async fn retry_submission(
        &mut self,
        session: &dyn WalletSession,
    ) -> Result<&SubmissionResult, WizardError> {
        let request = self.retry()?;
        self.run_transfer(session, request).await
    }

    async fn run_transfer(
        &mut self,
        session: &dyn WalletSession,
        request: TransferRequest,
    ) -> Result<&SubmissionResult, WizardError> {
        tracing::info!(to = %request.to, amount = %request.amount, "sending payment");
        let outcome = session
            .transfer(&request.to, &request.amount, &request.token)
            .await
            .map(|receipt| receipt.transaction_hash)
            .map_err(|e| e.to_string());
        self.settle(outcome)?;
        self.state
            .submission
            .as_ref()
            .ok_or(WizardError::InvalidTransition {
                event: Event::Settle,
                step: self.state.step(),
            })
    }

    /// Dispatch a due search through `resolver` and apply its answer.
    ///
    /// Returns `true` if results were applied.
    pub async fn run_due_search(
        &mut self,
        resolver: &dyn ProfileResolver,
        now: Timestamp,
    ) -> bool {
        let Some(request) = self.poll_search(now) else {
            return false;
        };
        let outcome = resolver
            .search_profiles(&request.query)
            .await
            .map_err(|e| e.to_string());
        self.apply_search_results(request.seq, outcome)
    }

    // ── Navigation ──────────────────────────────────────────────────────

    pub fn back(&mut self) -> Result<BackOutcome, WizardError> {
        let step = self.require(
            Event::Back,
            &[
                Step::SelectRecipientMode,
                Step::EnterAddress,
                Step::SearchProfile,
                Step::EnterAmount,
                Step::Confirm,
            ],
        )?;
        match step {
            Step::SelectRecipientMode => return Ok(BackOutcome::Exit),
            Step::EnterAddress | Step::SearchProfile => {
                self.state.recipient_mode = None;
                self.address_error = None;
                self.search.clear();
            }
            Step::EnterAmount => {
                self.state.recipient_mode = None;
                self.state.recipient = None;
                self.amount_error = None;
                self.search.clear();
                self.enter(Phase::Recipient);
            }
            Step::Confirm => {
                self.state.amount = None;
                self.enter(Phase::Amount);
            }
            Step::Submitting | Step::Succeeded | Step::Failed => {
                return Err(WizardError::InvalidTransition {
                    event: Event::Back,
                    step,
                })
            }
        }
        Ok(BackOutcome::Moved(self.step()))
    }

    /// Acknowledge a settled payment. The wizard resets; the caller
    /// navigates to the dashboard and drops it.
    pub fn go_home(&mut self) -> Result<(), WizardError> {
        self.require(Event::GoHome, &[Step::Succeeded, Step::Failed])?;
        *self = Self::with_search_debounce(self.session_address.clone(), self.search.debounce_ms());
        Ok(())
    }
}
