//! # gptbot-cli
//!
//! Wires the pieces together: config, OpenAI client, chat responder, handler
//! chain, web front end, and the Telegram REPL.

pub mod cli;
pub mod config;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use chat_session::{ChatConfig, ChatResponder, OpenAIChatApi};
use gptbot_core::Bot;
use gptbot_telegram::handlers::{
    AllowedUsers, AuthMiddleware, ChatHandler, CommandHandler, LoggingMiddleware, PolishMiddleware,
    TranscribeHandler,
};
use gptbot_telegram::{
    run_repl, FfmpegTranscoder, RandomFlushGate, TelegramBotAdapter,
};
use handler_chain::HandlerChain;
use openai_client::{parse_image_size, OpenAIClient};

pub use cli::{Cli, Commands};
pub use config::AppConfig;

/// Builds everything from the config and runs the bot until shutdown.
pub async fn run(config: AppConfig) -> Result<()> {
    let client = match &config.api_base {
        Some(base) => OpenAIClient::with_base_url(config.api_key.clone(), base.clone()),
        None => OpenAIClient::new(config.api_key.clone()),
    }
    .with_image_size(parse_image_size(&config.image_size));

    let responder = Arc::new(ChatResponder::new(
        Arc::new(OpenAIChatApi::new(client.clone())),
        ChatConfig {
            params: config.chat_params.clone(),
            assistant_prompt: config.assistant_prompt.clone(),
            show_usage: config.show_usage,
        },
    ));

    let teloxide_bot = teloxide::Bot::new(config.bot_token.clone());
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let chain = build_chain(&config, bot, responder.clone(), client);

    let web_params = gptbot_web::WebParams {
        bind: config.web_bind.clone(),
        chat_id: config.web_chat_id,
    };
    let web_responder = responder.clone();
    tokio::spawn(async move {
        if let Err(e) = gptbot_web::start_server(web_params, web_responder).await {
            warn!(error = %e, "Web server stopped");
        }
    });

    info!("step: starting telegram repl");
    run_repl(teloxide_bot, chain).await
}

fn build_chain(
    config: &AppConfig,
    bot: Arc<dyn Bot>,
    responder: Arc<ChatResponder>,
    client: OpenAIClient,
) -> HandlerChain {
    let mut chain = HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(AuthMiddleware::new(
            AllowedUsers::parse(&config.allowed_user_ids),
            bot.clone(),
        )));

    if config.polish_enabled {
        chain = chain.add_middleware(Arc::new(PolishMiddleware::new(
            responder.clone(),
            bot.clone(),
        )));
    }

    chain
        .add_handler(Arc::new(CommandHandler::new(
            bot.clone(),
            responder.clone(),
            Arc::new(client.clone()),
        )))
        .add_handler(Arc::new(TranscribeHandler::new(
            bot.clone(),
            Arc::new(client),
            Arc::new(FfmpegTranscoder),
            std::env::temp_dir(),
        )))
        .add_handler(Arc::new(ChatHandler::new(
            bot,
            responder,
            Arc::new(RandomFlushGate::new(config.stream_flush_threshold)),
        )))
}
