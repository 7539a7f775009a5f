//! App config loaded from environment variables (via `.env`).
//!
//! Only the bot token and API key are required; everything else carries the
//! defaults the bot ships with.

use anyhow::Result;
use std::env;

use openai_client::ChatParams;

/// Full application config.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// OPENAI_API_KEY
    pub api_key: String,
    /// OPENAI_API_BASE; default endpoint when unset
    pub api_base: Option<String>,
    /// Chat generation parameters (OPENAI_MODEL, TEMPERATURE, N_CHOICES,
    /// MAX_TOKENS, PRESENCE_PENALTY, FREQUENCY_PENALTY)
    pub chat_params: ChatParams,
    /// ASSISTANT_PROMPT
    pub assistant_prompt: String,
    /// SHOW_USAGE
    pub show_usage: bool,
    /// ALLOWED_TELEGRAM_USER_IDS: `*` or comma-separated ids
    pub allowed_user_ids: String,
    /// IMAGE_SIZE, e.g. "512x512"
    pub image_size: String,
    /// STREAM_FLUSH_THRESHOLD in [0, 1); higher means fewer edits
    pub stream_flush_threshold: f64,
    /// POLISH_ENABLED
    pub polish_enabled: bool,
    /// WEB_BIND address for the diction endpoint
    pub web_bind: String,
    /// WEB_CHAT_ID the web conversation runs under
    pub web_chat_id: i64,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_BOT_TOKEN
    /// if provided. Fails with the full list of missing required variables.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let mut missing = Vec::new();

        let bot_token = match token.or_else(|| env::var("TELEGRAM_BOT_TOKEN").ok()) {
            Some(value) => value,
            None => {
                missing.push("TELEGRAM_BOT_TOKEN");
                String::new()
            }
        };
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(value) => value,
            Err(_) => {
                missing.push("OPENAI_API_KEY");
                String::new()
            }
        };
        if !missing.is_empty() {
            anyhow::bail!(
                "The following environment values are missing in your .env: {}",
                missing.join(", ")
            );
        }

        let defaults = ChatParams::default();
        let chat_params = ChatParams {
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: env_or("TEMPERATURE", defaults.temperature),
            n_choices: env_or("N_CHOICES", defaults.n_choices),
            max_tokens: env_or("MAX_TOKENS", defaults.max_tokens),
            presence_penalty: env_or("PRESENCE_PENALTY", defaults.presence_penalty),
            frequency_penalty: env_or("FREQUENCY_PENALTY", defaults.frequency_penalty),
        };

        Ok(Self {
            bot_token,
            api_key,
            api_base: env::var("OPENAI_API_BASE").ok(),
            chat_params,
            assistant_prompt: env::var("ASSISTANT_PROMPT")
                .unwrap_or_else(|_| chat_session::DEFAULT_ASSISTANT_PROMPT.to_string()),
            show_usage: env::var("SHOW_USAGE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            allowed_user_ids: env::var("ALLOWED_TELEGRAM_USER_IDS")
                .unwrap_or_else(|_| "*".to_string()),
            image_size: env::var("IMAGE_SIZE").unwrap_or_else(|_| "512x512".to_string()),
            stream_flush_threshold: env_or(
                "STREAM_FLUSH_THRESHOLD",
                gptbot_telegram::DEFAULT_FLUSH_THRESHOLD,
            ),
            polish_enabled: env::var("POLISH_ENABLED")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            web_bind: env::var("WEB_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            web_chat_id: env_or("WEB_CHAT_ID", 21052),
            log_file: env::var("LOG_FILE").ok(),
        })
    }
}
