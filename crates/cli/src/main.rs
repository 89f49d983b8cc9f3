use std::env;

use async_trait::async_trait;
use bot::{BotConfig, ChatMessage, Handler, ReplySink};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Writes replies to stdout, one per line
struct ConsoleSink {
    out: Mutex<Stdout>,
}

impl ConsoleSink {
    fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }

    async fn write_line(&self, line: &str) -> anyhow::Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl ReplySink for ConsoleSink {
    async fn say(&self, text: &str) -> anyhow::Result<()> {
        self.write_line(text).await
    }

    async fn reply(&self, nick: &str, text: &str) -> anyhow::Result<()> {
        self.write_line(&format!("{}: {}", nick, text)).await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only replies
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BotConfig::from_env()?;
    let nick = env::var("ANIBOT_NICK").unwrap_or_else(|_| "user".to_string());

    let http = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()?;
    let handler = Handler::from_config(&config, http)?;
    let sink = ConsoleSink::new();

    tracing::info!(
        "anibot {} ready (endpoint: {}, prefix: '{}')",
        env!("CARGO_PKG_VERSION"),
        config.endpoint,
        config.prefix
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = ChatMessage::new(nick.as_str(), line);
        if handler.handle_message(&message, &sink).await.is_none() {
            tracing::trace!("Ignored line: {}", message.text);
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
