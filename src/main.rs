use binance_broker::{Client, ClientError, Config};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "binance-cli", about = "Query Binance broker and sub-account endpoints")]
struct Cli {
    /// Overrides BINANCE_BASE_URL.
    #[arg(long, env = "BINANCE_BASE_URL")]
    base_url: Option<String>,

    /// Sync the clock offset with the server before running the command.
    #[arg(long)]
    sync_time: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the server time.
    ServerTime,
    /// Measure and print the local clock offset.
    SyncTime,
    /// List every coin with its deposit/withdraw networks.
    CapitalConfig,
    /// List sub-accounts of the master account.
    SubAccounts {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Create a broker sub-account.
    CreateSubAccount {
        #[arg(long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let client = Client::from_config(&config);

    if cli.sync_time {
        client.new_set_server_time_service().send().await?;
    }

    match cli.command {
        Command::ServerTime => {
            let server_time = client.new_server_time_service().send().await?;
            println!("{server_time}");
        }
        Command::SyncTime => {
            let offset = client.new_set_server_time_service().send().await?;
            println!("offset: {offset} ms");
        }
        Command::CapitalConfig => {
            for coin in client.new_capital_config_service().send().await? {
                let networks: Vec<&str> =
                    coin.network_list.iter().map(|n| n.network.as_str()).collect();
                println!("{:<10} free={} networks={}", coin.coin, coin.free, networks.join(","));
            }
        }
        Command::SubAccounts { email, page, limit } => {
            let mut service = client.new_get_sub_account_list_service();
            if let Some(email) = email {
                service = service.email(email);
            }
            if let Some(page) = page {
                service = service.page(page);
            }
            if let Some(limit) = limit {
                service = service.limit(limit);
            }
            for account in service.send().await?.sub_accounts {
                println!(
                    "{} frozen={} created={}",
                    account.email, account.is_freeze, account.create_time
                );
            }
        }
        Command::CreateSubAccount { tag } => {
            let mut service = client.new_create_sub_account_service();
            if let Some(tag) = tag {
                service = service.tag(tag);
            }
            let created = service.send().await?;
            println!("{} {}", created.sub_account_id, created.email);
        }
    }

    Ok(())
}
