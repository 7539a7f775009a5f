//! # gptbot-telegram
//!
//! Telegram integration: teloxide wrappers implementing the core [`Bot`]
//! abstraction, converters from teloxide updates to core messages, the
//! streamed-reply edit loop, audio transcoding, the handler/middleware set,
//! and the REPL runner.
//!
//! [`Bot`]: gptbot_core::Bot

pub mod adapters;
pub mod bot_adapter;
pub mod handlers;
pub mod runner;
pub mod stream_edit;
pub mod transcode;

pub use adapters::TelegramMessageWrapper;
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
pub use stream_edit::{run_stream_reply, FlushGate, RandomFlushGate, DEFAULT_FLUSH_THRESHOLD};
pub use transcode::{FfmpegTranscoder, Transcoder};
