//! Chat plugin that answers AniList lookups.
//!
//! A chat line becomes a [`Trigger`] (a command like `.al frieren` or an
//! `https://anilist.co/anime/154587` link). The [`Handler`] turns each
//! trigger into exactly one [`Reply`] and hands it to a [`ReplySink`].

mod config;
mod error;
mod handler;
mod sink;
mod trigger;

pub use config::{BotConfig, ConfigError};
pub use error::ReplyError;
pub use handler::{Handler, Reply};
pub use sink::{ChatMessage, ReplySink};
pub use trigger::{Trigger, TriggerParser};
