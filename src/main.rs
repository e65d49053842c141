//! `hive-wallet`: command line access to the wallet flows.
//!
//! ```text
//! hive-wallet [--config wallet.toml] <command>
//!     rpc      list | add | remove | select | switch-auto
//!     swap     config | status | estimate | history | show | cancel | last-used
//!     tokens   balance | list | info | start-list | market | history
//!     tx       confirm
//!     account  vp
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hive_wallet::config::load_or_default;
use hive_wallet::lifecycle::signals::spawn_ctrl_c_handler;
use hive_wallet::observability::init_logging;
use hive_wallet::rpc::Rpc;
use hive_wallet::{RpcKind, Shutdown, Wallet};

#[derive(Parser)]
#[command(name = "hive-wallet")]
#[command(about = "Hive wallet swaps, token ledger and RPC node registry", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage RPC node lists
    #[command(subcommand)]
    Rpc(RpcCommand),
    /// Token swaps
    #[command(subcommand)]
    Swap(SwapCommand),
    /// Hive-Engine token ledger
    #[command(subcommand)]
    Tokens(TokensCommand),
    /// Sidechain transactions
    #[command(subcommand)]
    Tx(TxCommand),
    /// Hive accounts
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Hive,
    Engine,
    History,
}

impl From<KindArg> for RpcKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Hive => RpcKind::Hive,
            KindArg::Engine => RpcKind::HiveEngine,
            KindArg::History => RpcKind::AccountHistory,
        }
    }
}

#[derive(Args)]
struct EndpointArgs {
    #[arg(value_enum)]
    kind: KindArg,
    uri: String,
}

#[derive(Subcommand)]
enum RpcCommand {
    /// Show every list, or one
    List {
        #[arg(value_enum)]
        kind: Option<KindArg>,
    },
    /// Add a custom endpoint
    Add {
        #[command(flatten)]
        endpoint: EndpointArgs,
        #[arg(long)]
        testnet: bool,
        /// Make it the active endpoint
        #[arg(long)]
        activate: bool,
    },
    /// Remove a custom endpoint
    Remove {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Make a listed endpoint active
    Select {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Show or set the automatic switch flag
    SwitchAuto { enabled: Option<bool> },
}

#[derive(Subcommand)]
enum SwapCommand {
    /// Public swap configuration
    Config,
    /// Swap service status
    Status,
    /// Estimate a conversion path
    Estimate {
        start_token: String,
        end_token: String,
        amount: String,
    },
    /// Swap history of an account
    History { username: String },
    /// One swap
    Show { id: String },
    /// Cancel a swap
    Cancel { id: String },
    /// Show or remember the last used token pair
    LastUsed {
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
        set: Option<Vec<String>>,
    },
}

#[derive(Subcommand)]
enum TokensCommand {
    /// Token balances of an account
    Balance { account: String },
    /// Every token definition
    List,
    /// One token definition
    Info { symbol: String },
    /// Tokens the account can swap from
    StartList { account: String },
    /// Market metrics
    Market,
    /// Token operations of an account
    History {
        account: String,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

#[derive(Subcommand)]
enum TxCommand {
    /// Poll until the transaction is processed (Ctrl-C stops)
    Confirm { trx_id: String },
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Voting power and vote value
    Vp {
        name: String,
        /// Vote weight in percent
        #[arg(long, default_value_t = 100.0)]
        weight: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability.log_level);

    let mut wallet = Wallet::bootstrap(config)?;

    match cli.command {
        Commands::Rpc(command) => run_rpc(&mut wallet, command)?,
        Commands::Swap(command) => run_swap(&wallet, command).await?,
        Commands::Tokens(command) => run_tokens(&wallet, command).await?,
        Commands::Tx(TxCommand::Confirm { trx_id }) => {
            let shutdown = Shutdown::new();
            let receiver = shutdown.subscribe();
            let handler = spawn_ctrl_c_handler(shutdown);
            let result = wallet.confirmer().try_confirm_until(&trx_id, receiver).await;
            handler.abort();
            print_json(&result)?;
        }
        Commands::Account(AccountCommand::Vp { name, weight }) => {
            let Some(account) = wallet.hive.get_account(&name).await? else {
                eprintln!("Error: account {} not found", name);
                return Ok(());
            };
            let props = wallet.hive.get_global_properties().await?;
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
            print_json(&json!({
                "account": account.name,
                "voting_power": account.voting_power(now),
                "vote_value": account.vote_value(weight, &props, now, false),
                "full_vote_value": account.vote_value(weight, &props, now, true),
            }))?;
        }
    }

    Ok(())
}

fn run_rpc(wallet: &mut Wallet, command: RpcCommand) -> Result<(), Box<dyn std::error::Error>> {
    let registry = &mut wallet.registry;
    match command {
        RpcCommand::List { kind } => {
            let kinds: Vec<RpcKind> = match kind {
                Some(kind) => vec![kind.into()],
                None => RpcKind::ALL.to_vec(),
            };
            let mut lists = serde_json::Map::new();
            for kind in kinds {
                lists.insert(kind.to_string(), serde_json::to_value(registry.list(kind))?);
            }
            print_json(&lists)?;
        }
        RpcCommand::Add {
            endpoint,
            testnet,
            activate,
        } => {
            let rpc = if testnet {
                Rpc::testnet(endpoint.uri)
            } else {
                Rpc::new(endpoint.uri)
            };
            let kind = endpoint.kind.into();
            registry.add(kind, rpc, activate)?;
            print_json(&registry.list(kind))?;
        }
        RpcCommand::Remove { endpoint } => {
            let kind = endpoint.kind.into();
            registry.remove(kind, &endpoint.uri)?;
            print_json(&registry.list(kind))?;
        }
        RpcCommand::Select { endpoint } => {
            let kind = endpoint.kind.into();
            registry.select(kind, &endpoint.uri)?;
            print_json(&*registry.active().get(kind))?;
        }
        RpcCommand::SwitchAuto { enabled } => {
            if let Some(enabled) = enabled {
                registry.set_switch_auto(enabled)?;
            }
            print_json(&json!({ "switch_auto": registry.switch_auto()? }))?;
        }
    }
    Ok(())
}

async fn run_swap(wallet: &Wallet, command: SwapCommand) -> Result<(), Box<dyn std::error::Error>> {
    let swaps = &wallet.swaps;
    match command {
        SwapCommand::Config => print_json(&swaps.get_config().await?)?,
        SwapCommand::Status => print_json(&swaps.get_server_status().await?)?,
        SwapCommand::Estimate {
            start_token,
            end_token,
            amount,
        } => {
            let estimate = swaps.get_estimate(&start_token, &end_token, &amount).await?;
            print_json(&json!({
                "steps": estimate.steps,
                "final_amount": estimate.final_amount(),
            }))?;
        }
        SwapCommand::History { username } => {
            print_json(&swaps.retrieve_swap_history(&username).await?)?
        }
        SwapCommand::Show { id } => print_json(&swaps.get_swap(&id).await?)?,
        SwapCommand::Cancel { id } => {
            swaps.cancel_swap(&id).await?;
            print_json(&json!({ "cancelled": id }))?;
        }
        SwapCommand::LastUsed { set } => {
            if let Some([from, to]) = set.as_deref() {
                swaps.save_last_used(from, to)?;
            }
            print_json(&swaps.get_last_used()?)?;
        }
    }
    Ok(())
}

async fn run_tokens(wallet: &Wallet, command: TokensCommand) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = &wallet.ledger;
    match command {
        TokensCommand::Balance { account } => print_json(&ledger.get_user_balance(&account).await?)?,
        TokensCommand::List => print_json(&ledger.get_all_tokens().await?)?,
        TokensCommand::Info { symbol } => print_json(&ledger.get_token_info(&symbol).await?)?,
        TokensCommand::StartList { account } => {
            let Some(account) = wallet.hive.get_account(&account).await? else {
                eprintln!("Error: account {} not found", account);
                return Ok(());
            };
            print_json(&wallet.swaps.get_swap_token_start_list(&account).await?)?;
        }
        TokensCommand::Market => print_json(&ledger.get_tokens_market().await?)?,
        TokensCommand::History {
            account,
            symbol,
            limit,
            offset,
        } => {
            let history = ledger
                .get_account_history(&account, symbol.as_deref(), limit, offset)
                .await?;
            print_json(&history)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
