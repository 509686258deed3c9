//! End-to-end payment scenarios driving the wizard against nullable
//! wallet sessions and profile resolvers.

use luvpay_nullables::{NullClock, NullProfileResolver, NullWalletSession};
use luvpay_types::{ChainAddress, Profile, TokenAmount, TokenId, TxHash};
use luvpay_wallet_core::WalletSession;
use luvpay_wizard::{
    PaymentWizard, RecipientMode, SearchView, Step, SubmissionResult, ValidationError,
    WizardError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SESSION: &str = "0x9999999999999999999999999999999999999999";
const RECIPIENT: &str = "0x1111111111111111111111111111111111111111";

fn session_address() -> ChainAddress {
    ChainAddress::parse(SESSION).unwrap()
}

fn amount(raw: &str) -> TokenAmount {
    TokenAmount::parse(raw).unwrap()
}

fn session_with_balance(raw: &str) -> NullWalletSession {
    NullWalletSession::connected(session_address(), amount(raw))
}

fn profile(id: &str, handle: &str, owner: &str) -> Profile {
    Profile {
        id: id.into(),
        handle: Some(handle.into()),
        owned_by: owner.into(),
        avatar_uri: None,
    }
}

async fn balance_of(session: &NullWalletSession) -> TokenAmount {
    session
        .balance(&TokenId::Native)
        .await
        .expect("balance")
        .display_value
}

/// Drive a fresh wizard to the confirm step paying RECIPIENT `raw`.
async fn wizard_at_confirm(session: &NullWalletSession, raw: &str) -> PaymentWizard {
    let mut wizard = PaymentWizard::new(session.address().expect("connected"));
    wizard.choose_mode(RecipientMode::Address).unwrap();
    wizard.edit_address(RECIPIENT);
    wizard.submit_address().unwrap();
    wizard.edit_amount(raw);
    wizard.submit_amount(&balance_of(session).await).unwrap();
    wizard
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_a_address_payment_succeeds() {
    let session = session_with_balance("25");
    let hash = TxHash::new([0x42; 32]);
    session.succeed_next(hash);

    let mut wizard = wizard_at_confirm(&session, "10").await;
    assert_eq!(wizard.step(), Step::Confirm);

    let result = wizard.submit(&session).await.unwrap();
    assert_eq!(result, &SubmissionResult::Success { tx_hash: hash });
    assert_eq!(wizard.step(), Step::Succeeded);

    let calls = session.transfers();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to.as_str(), RECIPIENT);
    assert_eq!(calls[0].amount, "10");
    assert_eq!(calls[0].token, TokenId::Native);
}

#[tokio::test]
async fn scenario_b_insufficient_funds_stays_on_amount() {
    let session = session_with_balance("25");
    let mut wizard = PaymentWizard::new(session_address());
    wizard.choose_mode(RecipientMode::Address).unwrap();
    wizard.edit_address(RECIPIENT);
    wizard.submit_address().unwrap();

    wizard.edit_amount("100");
    let err = wizard
        .submit_amount(&balance_of(&session).await)
        .unwrap_err();
    assert!(matches!(
        err,
        WizardError::Validation(ValidationError::InsufficientFunds { .. })
    ));
    assert_eq!(wizard.step(), Step::EnterAmount);
    assert!(wizard.state().amount.is_none());
    assert_eq!(session.transfer_count(), 0);
}

#[tokio::test]
async fn scenario_c_self_payment_is_rejected() {
    let mut wizard = PaymentWizard::new(session_address());
    wizard.choose_mode(RecipientMode::Address).unwrap();
    wizard.edit_address(SESSION);
    assert_eq!(
        wizard.submit_address(),
        Err(WizardError::Validation(ValidationError::SelfPayment))
    );
    assert_eq!(wizard.step(), Step::EnterAddress);
}

#[tokio::test]
async fn failed_transfer_can_be_retried_with_identical_request() {
    let session = session_with_balance("25");
    session.fail_next("user rejected transaction");

    let mut wizard = wizard_at_confirm(&session, "2.5").await;
    let result = wizard.submit(&session).await.unwrap();
    assert_eq!(
        result,
        &SubmissionResult::Failure {
            error: "user rejected transaction".into()
        }
    );
    assert_eq!(wizard.step(), Step::Failed);

    let result = wizard.retry_submission(&session).await.unwrap();
    assert!(matches!(result, SubmissionResult::Success { .. }));

    let calls = session.transfers();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn cancel_then_confirm_issues_exactly_one_transfer() {
    let session = session_with_balance("25");
    let mut wizard = wizard_at_confirm(&session, "1").await;
    wizard.cancel().unwrap();
    assert_eq!(wizard.step(), Step::SelectRecipientMode);
    assert!(wizard.state().recipient.is_none());
    assert!(wizard.state().amount.is_none());
    assert_eq!(session.transfer_count(), 0);

    wizard.choose_mode(RecipientMode::Address).unwrap();
    wizard.edit_address(RECIPIENT);
    wizard.submit_address().unwrap();
    wizard.edit_amount("1");
    wizard.submit_amount(&amount("25")).unwrap();
    wizard.submit(&session).await.unwrap();
    assert_eq!(session.transfer_count(), 1);

    assert!(wizard.submit(&session).await.is_err());
    assert_eq!(session.transfer_count(), 1);
}

#[tokio::test]
async fn profile_search_is_debounced_and_pays_the_owner() {
    let session = session_with_balance("25");
    let resolver = NullProfileResolver::new(vec![
        profile("0x05", "@wallaby", RECIPIENT),
        profile("0x06", "@walrus", "0x2222222222222222222222222222222222222222"),
    ]);
    let clock = NullClock::new(0);
    let mut wizard = PaymentWizard::new(session_address());
    wizard.choose_mode(RecipientMode::Profile).unwrap();

    for query in ["w", "wa", "wal", "wall"] {
        wizard.edit_search(query, clock.now()).unwrap();
        clock.advance(200);
        assert!(!wizard.run_due_search(&resolver, clock.now()).await);
    }
    assert_eq!(wizard.search_view(), SearchView::Loading);
    assert!(resolver.queries().is_empty());

    clock.advance(1_000);
    assert!(wizard.run_due_search(&resolver, clock.now()).await);
    assert_eq!(resolver.queries(), vec!["wall".to_string()]);

    let picked = match wizard.search_view() {
        SearchView::Results(profiles) => {
            assert_eq!(profiles.len(), 1);
            profiles[0].clone()
        }
        other => panic!("expected results, got {other:?}"),
    };
    wizard.pick_candidate(&picked).unwrap();
    assert_eq!(wizard.step(), Step::EnterAmount);

    wizard.edit_amount("3");
    wizard.submit_amount(&balance_of(&session).await).unwrap();
    let summary = wizard.confirm_summary().unwrap();
    assert_eq!(summary.profile_name.as_deref(), Some("@wallaby"));

    wizard.submit(&session).await.unwrap();
    assert_eq!(session.transfers()[0].to.as_str(), RECIPIENT);
}

#[tokio::test]
async fn three_quick_keystrokes_dispatch_one_search() {
    let resolver = NullProfileResolver::default();
    let clock = NullClock::new(10_000);
    let mut wizard = PaymentWizard::new(session_address());
    wizard.choose_mode(RecipientMode::Profile).unwrap();

    wizard.edit_search("a", clock.now()).unwrap();
    clock.advance(100);
    wizard.edit_search("ab", clock.now()).unwrap();
    clock.advance(100);
    wizard.edit_search("abc", clock.now()).unwrap();

    clock.advance(999);
    assert!(!wizard.run_due_search(&resolver, clock.now()).await);
    clock.advance(1);
    assert!(wizard.run_due_search(&resolver, clock.now()).await);
    clock.advance(5_000);
    assert!(!wizard.run_due_search(&resolver, clock.now()).await);

    assert_eq!(resolver.queries(), vec!["abc".to_string()]);
}

#[tokio::test]
async fn resolver_failure_stays_in_search() {
    let resolver = NullProfileResolver::default();
    resolver.fail_with(Some("rate limited"));
    let mut wizard = PaymentWizard::with_search_debounce(session_address(), 10);
    wizard.choose_mode(RecipientMode::Profile).unwrap();
    wizard
        .edit_search("x", luvpay_types::Timestamp::from_millis(0))
        .unwrap();
    assert!(
        wizard
            .run_due_search(&resolver, luvpay_types::Timestamp::from_millis(10))
            .await
    );
    assert!(matches!(wizard.search_view(), SearchView::Failed(m) if m.contains("rate limited")));
    assert_eq!(wizard.step(), Step::SearchProfile);
}
