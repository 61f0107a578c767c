//! Reply delivery
//!
//! Each reply line is delivered with its own `send` call, in order.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{Error, Result};

/// Delivers one line of text to a conversation
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, channel: &str, text: &str) -> Result<()>;
}

/// Posts replies through a Slack incoming webhook
#[derive(Debug, Clone)]
pub struct SlackWebhookSink {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookSink {
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl ReplySink for SlackWebhookSink {
    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "channel": format!("#{channel}"),
            "text": text,
        });

        self.client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Delivery(e.to_string()))?;

        debug!(channel, "Reply posted to Slack");
        Ok(())
    }
}

/// Prints replies to stdout, one per line
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn send(&self, _channel: &str, text: &str) -> Result<()> {
        #[allow(clippy::print_stdout)]
        {
            println!("{text}");
        }
        Ok(())
    }
}

/// Keeps every reply in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `(channel, text)` pairs in delivery order
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Delivered texts only
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }
}
