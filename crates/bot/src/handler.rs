use std::sync::Arc;

use anilist::{
    AnilistClient, Anime, CharacterData, EntityKind, GraphQlRequest, Lookup, Manga, MediaData,
    Payload, QueryTemplates, Record, StaffData,
};
use formatter::{truncate, ReplyFormatter};
use serde::de::DeserializeOwned;

use crate::{BotConfig, ChatMessage, ConfigError, ReplyError, ReplySink, Trigger, TriggerParser};

/// What the bot sends back for one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A result line for the whole channel
    Say(String),
    /// An error or prompt addressed to the user who asked
    Reply(String),
}

/// Turns triggers into replies: build query, call the API, format.
pub struct Handler {
    client: AnilistClient,
    templates: Arc<QueryTemplates>,
    formatter: ReplyFormatter,
    parser: TriggerParser,
    max_reply_length: usize,
}

impl Handler {
    pub fn new(
        client: AnilistClient,
        templates: Arc<QueryTemplates>,
        config: &BotConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            client,
            templates,
            formatter: ReplyFormatter::new(config.title_priority()),
            parser: TriggerParser::new(config)?,
            max_reply_length: config.max_reply_length,
        })
    }

    /// Build a handler talking to `config.endpoint` through `http`
    pub fn from_config(config: &BotConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        let client = AnilistClient::with_endpoint(http, config.endpoint.clone());
        Self::new(client, Arc::new(QueryTemplates::new()), config)
    }

    /// Parse a chat line, answer it and deliver the reply.
    ///
    /// Returns `None` when the line is not a trigger. Delivery failures are
    /// logged, never returned.
    pub async fn handle_message(
        &self,
        message: &ChatMessage,
        sink: &dyn ReplySink,
    ) -> Option<Reply> {
        let trigger = self.parser.parse(&message.text)?;
        let reply = self.handle(&trigger).await;

        let delivered = match &reply {
            Reply::Say(text) => sink.say(text).await,
            Reply::Reply(text) => sink.reply(&message.sender, text).await,
        };
        if let Err(e) = delivered {
            tracing::error!("Failed to deliver reply to {}: {}", message.sender, e);
        }

        Some(reply)
    }

    /// Answer one trigger. Every outcome, including errors, is a reply.
    pub async fn handle(&self, trigger: &Trigger) -> Reply {
        match self.lookup(trigger).await {
            Ok(line) => Reply::Say(truncate(&line, self.max_reply_length)),
            Err(e) => {
                if e.is_service_failure() {
                    let cause = std::error::Error::source(&e)
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    tracing::warn!(
                        "AniList {} lookup for '{}' failed: {} {}",
                        trigger.kind,
                        trigger.query_text(),
                        e,
                        cause
                    );
                } else {
                    tracing::debug!("AniList {} lookup: {}", trigger.kind, e);
                }
                Reply::Reply(truncate(&e.to_string(), self.max_reply_length))
            }
        }
    }

    async fn lookup(&self, trigger: &Trigger) -> Result<String, ReplyError> {
        let lookup = Lookup::from_parts(trigger.search.as_deref(), trigger.id)?;
        let request = self.templates.build(trigger.kind, &lookup);
        let query = trigger.query_text();

        let line = match trigger.kind {
            EntityKind::Anime => {
                let anime = self.fetch::<MediaData<Anime>>(&request, &query).await?;
                self.formatter.anime(&anime)
            }
            EntityKind::Manga => {
                let manga = self.fetch::<MediaData<Manga>>(&request, &query).await?;
                self.formatter.manga(&manga)
            }
            EntityKind::Character => {
                let character = self.fetch::<CharacterData>(&request, &query).await?;
                self.formatter.character(&character)
            }
            EntityKind::Staff => {
                let staff = self.fetch::<StaffData>(&request, &query).await?;
                self.formatter.staff(&staff)
            }
        };

        Ok(line)
    }

    async fn fetch<D>(&self, request: &GraphQlRequest, query: &str) -> Result<D::Record, ReplyError>
    where
        D: Payload + DeserializeOwned,
    {
        let response = self.client.query::<D>(request).await?;
        if response.has_errors() {
            return Err(ReplyError::no_match(query));
        }

        let record = response
            .into_record()
            .ok_or_else(|| ReplyError::no_match(query))?;
        record.validate()?;
        Ok(record)
    }
}
