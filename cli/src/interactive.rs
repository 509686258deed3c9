//! Line-driven terminal front-end for the payment wizard.

use std::fmt::Display;
use std::io::Write;
use std::time::Duration;

use anyhow::bail;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use luvpay_shell::{Route, Shell};
use luvpay_types::{Chain, Timestamp, TokenId};
use luvpay_utils::format_number;
use luvpay_wallet_core::{ProfileResolver, WalletSession};
use luvpay_wizard::{
    PaymentWizard, Phase, RecipientMode, SearchView, Step, SubmissionResult, WizardError,
};

/// Rows shown while a search is outstanding.
const PLACEHOLDER_ROWS: usize = 5;
const PLACEHOLDER_ROW: &str = "  ░░░░░░░░░░░░░░░░";

/// Prompt-and-answer terminal over any line source and sink.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: impl Display) -> anyhow::Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

/// Everything the wizard talks to while running.
pub struct Collaborators<'a> {
    pub session: &'a dyn WalletSession,
    pub resolver: &'a dyn ProfileResolver,
    pub chain: Chain,
    pub shell: &'a Shell,
}

/// Drive `wizard` until the user leaves it. Returns where to go next.
pub async fn run<R, W>(
    wizard: &mut PaymentWizard,
    with: &Collaborators<'_>,
    term: &mut Terminal<R, W>,
) -> anyhow::Result<Route>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut symbol = with.chain.native_symbol().to_string();
    let mut shown_phase = None;

    loop {
        let phase = wizard.phase();
        if shown_phase != Some(phase) {
            term.say("")?;
            term.say(format!("== {} ==", phase.title()))?;
            term.say(phase.description())?;
            shown_phase = Some(phase);
        }

        match wizard.step() {
            Step::SelectRecipientMode => {
                let answer = term
                    .ask(&format!(
                        "[1] {}  [2] {}  [b]ack: ",
                        RecipientMode::Address.label(),
                        RecipientMode::Profile.label()
                    ))
                    .await?;
                match answer.as_str() {
                    "1" => wizard.choose_mode(RecipientMode::Address)?,
                    "2" => wizard.choose_mode(RecipientMode::Profile)?,
                    "b" => {
                        if let Some(route) = with.shell.after_back(wizard.back()?) {
                            return Ok(route);
                        }
                    }
                    _ => term.say("Choose 1 or 2.")?,
                }
            }

            Step::EnterAddress => {
                let answer = term.ask("Recipient address ([b]ack): ").await?;
                if answer == "b" {
                    wizard.back()?;
                    continue;
                }
                wizard.edit_address(answer);
                shown_inline(wizard.submit_address(), term)?;
            }

            Step::SearchProfile => {
                let answer = term
                    .ask("Search Lens profiles, #N to pick a result, or [b]ack: ")
                    .await?;
                if answer == "b" {
                    wizard.back()?;
                    continue;
                }
                if let Some(pick) = answer.strip_prefix('#') {
                    let picked = pick.parse::<usize>().ok().and_then(|n| match wizard.search_view() {
                        SearchView::Results(profiles) => {
                            n.checked_sub(1).and_then(|i| profiles.get(i)).cloned()
                        }
                        _ => None,
                    });
                    match picked {
                        Some(profile) => shown_inline(wizard.pick_candidate(&profile), term)?,
                        None => term.say("No such result.")?,
                    }
                    continue;
                }

                wizard.edit_search(answer, Timestamp::now())?;
                render_search(wizard.search_view(), term)?;
                if let Some(deadline) = wizard.search_deadline() {
                    let wait = deadline.as_millis().saturating_sub(Timestamp::now().as_millis());
                    tokio::time::sleep(Duration::from_millis(wait + 1)).await;
                }
                wizard.run_due_search(with.resolver, Timestamp::now()).await;
                render_search(wizard.search_view(), term)?;
            }

            Step::EnterAmount => {
                let available = match with.session.balance(&TokenId::Native).await {
                    Ok(balance) => {
                        term.say(format!(
                            "Balance: {} {}",
                            format_number(&balance.display_value),
                            balance.symbol
                        ))?;
                        symbol = balance.symbol;
                        Some(balance.display_value)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "balance unavailable");
                        term.say(format!("Balance unavailable: {e}"))?;
                        None
                    }
                };
                let answer = term.ask("Amount ([b]ack): ").await?;
                if answer == "b" {
                    wizard.back()?;
                    continue;
                }
                if !wizard.edit_amount(answer) {
                    term.say("Invalid amount")?;
                    continue;
                }
                match available {
                    Some(balance) => shown_inline(wizard.submit_amount(&balance), term)?,
                    None => term.say("Funds can't be checked right now. Try again or go [b]ack.")?,
                }
            }

            Step::Confirm => {
                if let Some(summary) = wizard.confirm_summary() {
                    let mut line = format!("You are sending {} {} to {}", summary.amount, symbol, summary.to);
                    if let Some(name) = summary.profile_name {
                        line.push_str(&format!(", the owner of Lens profile {name}"));
                    }
                    term.say(line)?;
                }
                let answer = term.ask("[y] Send  [c]ancel  [b]ack: ").await?;
                match answer.as_str() {
                    "y" => {
                        term.say("")?;
                        term.say(format!("== {} ==", Phase::Send.title()))?;
                        term.say(Phase::Send.description())?;
                        shown_phase = Some(Phase::Send);
                        wizard.submit(with.session).await?;
                    }
                    "c" => wizard.cancel()?,
                    "b" => {
                        wizard.back()?;
                    }
                    _ => term.say("Answer y, c or b.")?,
                }
            }

            Step::Submitting => bail!("payment still in flight"),

            Step::Succeeded => {
                if let Some(SubmissionResult::Success { tx_hash }) = wizard.submission() {
                    term.say("Payment sent!")?;
                    term.say(with.chain.tx_url(tx_hash))?;
                }
                term.ask("Press enter to go home. ").await?;
                return Ok(with.shell.go_home(wizard)?);
            }

            Step::Failed => {
                if let Some(SubmissionResult::Failure { error }) = wizard.submission() {
                    term.say("Payment Failed!")?;
                    term.say(error)?;
                }
                let answer = term.ask("[r] Try Again  [h] Go Home: ").await?;
                match answer.as_str() {
                    "r" => {
                        wizard.retry_submission(with.session).await?;
                    }
                    "h" => return Ok(with.shell.go_home(wizard)?),
                    _ => term.say("Answer r or h.")?,
                }
            }
        }
    }
}

/// Print validation failures inline; other wizard errors propagate.
fn shown_inline<R, W: Write>(
    result: Result<(), WizardError>,
    term: &mut Terminal<R, W>,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(WizardError::Validation(e)) => {
            writeln!(term.output, "{e}")?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_search<R, W: Write>(view: SearchView<'_>, term: &mut Terminal<R, W>) -> anyhow::Result<()> {
    let out = &mut term.output;
    match view {
        SearchView::Idle => {}
        SearchView::Loading => {
            for _ in 0..PLACEHOLDER_ROWS {
                writeln!(out, "{PLACEHOLDER_ROW}")?;
            }
        }
        SearchView::Results([]) => writeln!(out, "No profiles found.")?,
        SearchView::Results(profiles) => {
            for (i, profile) in profiles.iter().enumerate() {
                writeln!(out, "  #{} {}  {}", i + 1, profile.display_name(), profile.owned_by)?;
            }
        }
        SearchView::Failed(message) => writeln!(out, "{message}")?,
    }
    Ok(())
}
