use anyhow::{bail, Context, Result};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::image::ImageDelivery;
use crate::orchestrator::classify::ImageSettings;
use crate::orchestrator::poll::PollPolicy;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub assistant_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub openai: OpenAiConfig,
    pub poll: PollPolicy,
    pub images: ImageSettings,
    pub delivery: ImageDelivery,
    pub cache_capacity: usize,
}

impl Config {
    /// Reads the process environment; call `dotenv` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let poll_defaults = PollPolicy::default();
        let image_defaults = ImageSettings::default();

        let poll = PollPolicy {
            interval: Duration::from_millis(parsed(
                &lookup,
                "POLL_INTERVAL_MS",
                poll_defaults.interval.as_millis() as u64,
            )?),
            max_attempts: parsed(&lookup, "POLL_MAX_ATTEMPTS", poll_defaults.max_attempts)?,
        };
        if poll.max_attempts == 0 {
            bail!("POLL_MAX_ATTEMPTS must be at least 1");
        }

        let cache_capacity = parsed(&lookup, "IMAGE_CACHE_CAPACITY", 256usize)?;
        if cache_capacity == 0 {
            bail!("IMAGE_CACHE_CAPACITY must be at least 1");
        }

        Ok(Config {
            bind_addr: parsed(
                &lookup,
                "BIND_ADDR",
                DEFAULT_BIND_ADDR.parse::<SocketAddr>()?,
            )?,
            openai: OpenAiConfig {
                api_key: required(&lookup, "OPENAI_API_KEY")?,
                assistant_id: required(&lookup, "ASSISTANT_ID")?,
                base_url: optional(&lookup, "OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(parsed(&lookup, "REQUEST_TIMEOUT_SECS", 120u64)?),
            },
            poll,
            images: ImageSettings {
                general_model: optional(&lookup, "IMAGE_MODEL")
                    .unwrap_or(image_defaults.general_model),
                diagram_model: optional(&lookup, "DIAGRAM_IMAGE_MODEL")
                    .unwrap_or(image_defaults.diagram_model),
                size: optional(&lookup, "IMAGE_SIZE").unwrap_or(image_defaults.size),
            },
            delivery: parsed(&lookup, "IMAGE_DELIVERY", ImageDelivery::default())?,
            cache_capacity,
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    optional(lookup, key).with_context(|| format!("{} must be set", key))
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {} `{}`: {}", key, raw, e)),
        None => Ok(default),
    }
}
