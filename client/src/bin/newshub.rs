//! Command-line front end for the news canister.
//!
//! Settings come from `NEWSHUB_*` environment variables; `--canister-id` and
//! `--network-url` override them for one invocation. Results print as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use newshub_client::domain::{JournalistId, UserId, service_definition};
use newshub_client::{ClientSettings, NewsAppClient, NewsService};

/// `newshub` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "newshub",
    about = "Call the newshub news canister",
    version
)]
struct CliArgs {
    /// Canister principal. Falls back to `NEWSHUB_CANISTER_ID`.
    #[arg(long = "canister-id", value_name = "principal", global = true)]
    canister_id: Option<String>,
    /// Replica URL. Falls back to `NEWSHUB_NETWORK_URL`.
    #[arg(long = "network-url", value_name = "url", global = true)]
    network_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the Candid service definition.
    Describe,
    /// Show the user bound to the caller identity.
    GetUser,
    /// List every user.
    ListUsers,
    /// Create a user.
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Add a topic to a user's requested topics.
    RequestTopic {
        #[arg(long = "user-id")]
        user_id: String,
        #[arg(long)]
        topic: String,
    },
    /// List every journalist with their articles.
    ListJournalists,
    /// Show one journalist.
    GetJournalist {
        #[arg(long = "journalist-id")]
        journalist_id: String,
    },
    /// Create a journalist.
    CreateJournalist {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Upload an article for a journalist.
    UploadArticle {
        #[arg(long = "journalist-id")]
        journalist_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        topic: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    if matches!(args.command, Command::Describe) {
        print!("{}", service_definition());
        return Ok(());
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let settings = apply_overrides(ClientSettings::from_environment()?, &args);
    let client = NewsAppClient::connect(&settings).await?;

    match args.command {
        Command::Describe => Ok(()),
        Command::GetUser => print_json(&client.get_user().await?),
        Command::ListUsers => print_json(&client.get_all_users().await?),
        Command::CreateUser { name, email } => Ok(client.create_user(&name, &email).await?),
        Command::RequestTopic { user_id, topic } => {
            Ok(client.request_topic(&UserId::new(user_id), &topic).await?)
        }
        Command::ListJournalists => print_json(&client.get_all_journalists().await?),
        Command::GetJournalist { journalist_id } => print_json(
            &client
                .get_journalist_by_id(&JournalistId::new(journalist_id))
                .await?,
        ),
        Command::CreateJournalist { name, email } => {
            Ok(client.create_journalist(&name, &email).await?)
        }
        Command::UploadArticle {
            journalist_id,
            title,
            content,
            topic,
        } => Ok(client
            .upload_article(&JournalistId::new(journalist_id), &title, &content, &topic)
            .await?),
    }
}

/// Layer command-line flags over settings loaded from the environment.
fn apply_overrides(mut settings: ClientSettings, args: &CliArgs) -> ClientSettings {
    if let Some(canister_id) = &args.canister_id {
        settings.canister_id = Some(canister_id.clone());
    }
    if let Some(network_url) = &args.network_url {
        settings.network_url = Some(network_url.clone());
    }
    settings
}

fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).wrap_err("render JSON output")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = render_json(value)?;
    println!("{rendered}");
    Ok(())
}
