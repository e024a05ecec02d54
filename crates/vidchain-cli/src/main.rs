//! # vidchain
//!
//! Command-line front end for the VidChain backend canister.
//!
//! Reads its connection settings from `VIDCHAIN_*` environment variables,
//! runs one command through [`VidChainClient`] and prints the result as
//! pretty JSON on stdout. Logs go to stderr; any failure exits non-zero.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vidchain_client::config::gateway_url;
use vidchain_client::{ClientConfig, GatewayBinding, UploadDraft, VidChainClient};
use vidchain_shared::constants::APP_NAME;
use vidchain_shared::ProfileUpdate;

use crate::cli::{birthday_secs, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,vidchain=info,vidchain_client=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(gateway) = cli.gateway {
        config.gateway_url = gateway_url(&gateway)
            .with_context(|| format!("--gateway must be an http(s) URL, got {gateway:?}"))?;
    }
    if cli.canister.is_some() {
        config.canister_id = cli.canister;
    }
    debug!(
        gateway = %config.gateway_url,
        canister = ?config.canister_id,
        authenticated = config.identity_token.is_some(),
        timeout = ?config.request_timeout,
        "Loaded configuration"
    );

    let binding = GatewayBinding::new(&config).context("invalid client configuration")?;
    let client = VidChainClient::new(Arc::new(binding));

    run(&client, cli.command).await
}

async fn run(client: &VidChainClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Trending => print(&client.get_trending_videos().await?),
        Command::Search { query, category } => {
            print(&client.search_videos(query, category).await?)
        }
        Command::Category { category } => print(&client.get_videos_by_category(category).await?),
        Command::Video { id } => print(&client.get_video(id).await?),
        Command::Uploads { user } => print(&client.get_user_videos(user).await?),
        Command::Profile { user: Some(user) } => print(&client.get_user_profile(user).await?),
        Command::Profile { user: None } => print(&client.get_profile().await?),
        Command::SetProfile {
            name,
            email,
            gender,
            birthday,
        } => {
            client
                .update_profile(ProfileUpdate {
                    name,
                    email,
                    gender,
                    birthday: birthday.map(birthday_secs),
                })
                .await?;
            done()
        }
        Command::Balance => {
            let balance = client.get_balance().await?;
            print(&json!({ "balance": balance.0.to_string() }))
        }
        Command::Analytics => print(&client.get_channel_analytics().await?),
        Command::Upload {
            title,
            description,
            category,
            channel,
            duration,
            thumbnail,
            short,
            media,
        } => {
            let draft = UploadDraft {
                title,
                description,
                category,
                channel,
                duration_secs: duration,
                media_path: media,
                thumbnail_path: thumbnail,
                is_short: short,
            };
            let upload = draft.prepare().await?;
            info!(
                title = %upload.title,
                size = upload.media.content.len(),
                hash = %upload.content_hash,
                "Uploading to {}", APP_NAME
            );
            let id = client.upload_video(upload).await?;
            print(&json!({ "videoId": id.0.to_string() }))
        }
        Command::Delete { id } => {
            client.delete_video(id).await?;
            done()
        }
        Command::Watch { id } => {
            client.watch_video(id).await?;
            done()
        }
        Command::Like { id } => {
            client.like_video(id).await?;
            done()
        }
        Command::Dislike { id } => {
            client.dislike_video(id).await?;
            done()
        }
        Command::Report { id, reason } => {
            client.report_video(id, reason).await?;
            done()
        }
        Command::Stake { amount } => {
            client.stake_tokens(amount).await?;
            done()
        }
        Command::Mint { id, contract } => {
            client.mint_video_nft(id, contract).await?;
            done()
        }
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn done() -> anyhow::Result<()> {
    print(&json!({ "status": "ok" }))
}
