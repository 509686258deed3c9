//! `luvpay`: send native-token payments from the terminal.

mod config;
mod interactive;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use luvpay_shell::{lookup_own_profile, ConnectSection, Page, Route, Shell};
use luvpay_types::{Chain, ChainAddress, TokenId};
use luvpay_utils::{format_number, init_logging};
use luvpay_wallet_core::{LensClient, ProfileResolver, RpcClient, RpcWalletSession, WalletSession};

use crate::config::AppConfig;
use crate::interactive::{Collaborators, Terminal};

#[derive(Parser)]
#[command(name = "luvpay", about = "LUV NFT Pay: send crypto to anyone")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "LUVPAY_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of a node that manages the paying account.
    #[arg(long, env = "LUVPAY_RPC_URL")]
    rpc_url: Option<String>,

    /// The connected account (0x-prefixed address).
    #[arg(long, env = "LUVPAY_ACCOUNT")]
    account: Option<String>,

    /// Chain: "polygon", "mumbai", "ethereum" or "sepolia".
    #[arg(long, env = "LUVPAY_CHAIN")]
    chain: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "LUVPAY_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Walk through sending a payment.
    Send,
    /// Print the account's native balance.
    Balance,
    /// Look up Lens profiles.
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(clap::Subcommand)]
enum ProfilesAction {
    /// Search profiles by handle.
    Search { query: String },
    /// Show the profile owned by the configured account.
    Mine,
}

/// Layer command-line overrides on top of the file (or default) config.
fn resolve_config(cli: &Cli, base: AppConfig) -> anyhow::Result<AppConfig> {
    let account = match cli.account.as_deref() {
        Some(raw) => Some(ChainAddress::parse(raw).context("invalid --account")?),
        None => base.account.clone(),
    };
    let chain = match cli.chain.as_deref() {
        Some(raw) => raw.parse::<Chain>().context("invalid --chain")?,
        None => base.chain,
    };
    Ok(AppConfig {
        rpc_url: cli.rpc_url.clone().unwrap_or(base.rpc_url.clone()),
        account,
        chain,
        log_level: cli.log_level.clone().unwrap_or(base.log_level.clone()),
        ..base
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, load_error) = match cli.config.as_deref() {
        Some(path) => match AppConfig::from_toml_file(path) {
            Ok(cfg) => (Some(cfg), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };
    let config = resolve_config(&cli, file_config.unwrap_or_default())?;

    init_logging(config.log_format, &config.log_level);
    if let Some(e) = load_error {
        tracing::warn!("{e}, using defaults");
    } else if let Some(path) = cli.config.as_deref() {
        tracing::info!("Loaded config from {}", path.display());
    }

    let session = RpcWalletSession::new(
        RpcClient::new(config.rpc_url.clone())?,
        config.account.clone(),
        config.chain.native_symbol(),
        Duration::from_millis(config.receipt_poll_ms),
    );
    let lens = LensClient::new(config.lens_api_url.clone())?;
    tracing::debug!(
        rpc = %config.rpc_url,
        chain = config.chain.as_str(),
        account = ?config.account.as_ref().map(ChainAddress::short),
        "wallet session ready"
    );

    match cli.command {
        Command::Send => send(&config, &session, &lens).await,
        Command::Balance => {
            if session.address().is_none() {
                bail!("no account configured; pass --account or set LUVPAY_ACCOUNT");
            }
            let balance = session.balance(&TokenId::Native).await?;
            println!("{} {}", format_number(&balance.display_value), balance.symbol);
            Ok(())
        }
        Command::Profiles { action } => match action {
            ProfilesAction::Search { query } => {
                let profiles = lens.search_profiles(&query).await?;
                if profiles.is_empty() {
                    println!("No profiles found.");
                }
                for profile in profiles {
                    println!("{}  {}  {}", profile.display_name(), profile.owned_by, profile.id);
                }
                Ok(())
            }
            ProfilesAction::Mine => {
                let Some(address) = session.address() else {
                    bail!("no account configured; pass --account or set LUVPAY_ACCOUNT");
                };
                println!("{}", lookup_own_profile(&lens, &address).await.message());
                Ok(())
            }
        },
    }
}

async fn send(
    config: &AppConfig,
    session: &RpcWalletSession,
    lens: &LensClient,
) -> anyhow::Result<()> {
    let shell = Shell::new(config.dashboard_path.clone(), config.search_debounce_ms);
    let mut wizard = match shell.open(&Route::Send, session.address().as_ref()) {
        Page::Send(wizard) => wizard,
        Page::Connect(section) => {
            println!("{}.", ConnectSection::WELCOME_TITLE);
            for entry in section.entries() {
                println!("  {}", entry.prompt);
            }
            bail!("no account configured; pass --account or set LUVPAY_ACCOUNT");
        }
        other => bail!("unexpected page for {}: {other:?}", Route::Send),
    };

    let with = Collaborators {
        session,
        resolver: lens,
        chain: config.chain,
        shell: &shell,
    };
    let mut term = Terminal::new(
        tokio::io::BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );
    let next = interactive::run(&mut wizard, &with, &mut term).await?;
    tracing::info!(route = %shell.href(&next), "left payment wizard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("luvpay").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_file_config() {
        let base = AppConfig {
            rpc_url: "http://file:8545".into(),
            search_debounce_ms: 300,
            ..AppConfig::default()
        };
        let cli = cli(&[
            "--rpc-url",
            "http://flag:8545",
            "--chain",
            "sepolia",
            "--account",
            "0x1111111111111111111111111111111111111111",
            "balance",
        ]);
        let config = resolve_config(&cli, base).unwrap();
        assert_eq!(config.rpc_url, "http://flag:8545");
        assert_eq!(config.chain, Chain::Sepolia);
        assert!(config.account.is_some());
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn file_values_survive_without_flags() {
        let base = AppConfig {
            chain: Chain::Mumbai,
            ..AppConfig::default()
        };
        let config = resolve_config(&cli(&["profiles", "mine"]), base).unwrap();
        assert_eq!(config.chain, Chain::Mumbai);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn rejects_malformed_account() {
        let cli = cli(&["--account", "0x12", "send"]);
        assert!(resolve_config(&cli, AppConfig::default()).is_err());
    }
}
