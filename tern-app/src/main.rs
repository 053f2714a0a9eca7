use anyhow::Result;
use tern_common::observability::{init_logging, LogConfig};
use tern_config::{TernConfig, TernConfigLoader};
use tern_dispatch::{Dispatcher, SlackWebhook};
use tern_social::{Credentials, TwitterApi};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins)
    let cfg: TernConfig = TernConfigLoader::new().with_file("tern.yaml").load()?;

    init_logging(LogConfig::default())?;

    let creds = Credentials::new(
        cfg.twitter.consumer_key,
        cfg.twitter.consumer_secret,
        cfg.twitter.access_token,
        cfg.twitter.access_token_secret,
    );
    let api = TwitterApi::new(creds)?;
    let webhook = SlackWebhook::new(&cfg.slack.webhook_url)?;
    let dispatcher = Dispatcher::new(api, webhook);

    tracing::info!(channel = %cfg.slack.channel, "tern ready; reading commands from stdin");

    // The chat-ingest layer is out of scope here; stdin stands in for it.
    // One line = one command, reported against the configured channel.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = dispatcher.execute(&line, &cfg.slack.channel).await {
            tracing::info!(error = %err, "command failed");
        }
    }

    Ok(())
}
