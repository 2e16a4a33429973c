use super::{Argument, CommandContext};
use crate::resolver::ResolveError;
use mcsapi_api::{PlayerUuid, RemoteError};
use mcsapi_text::{Message, MessageColor, MessageNode, Text};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
    .unwrap()
});

/// Whether `arg` is a dashed version 1 to 5 uuid.
pub fn is_uuid_shaped(arg: &str) -> bool {
    UUID_REGEX.is_match(arg)
}

/// How a command argument names the player to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetQuery {
    /// No argument, the invoker themselves.
    Invoker,
    /// Already resolved by the host.
    Player(PlayerUuid),
    Uuid(PlayerUuid),
    Name(String),
}

impl TargetQuery {
    pub fn classify(arg: Option<&Argument>) -> TargetQuery {
        match arg {
            None => TargetQuery::Invoker,
            Some(Argument::Player(uuid)) => TargetQuery::Player(*uuid),
            Some(Argument::Text(text)) => match text.parse() {
                Ok(uuid) if is_uuid_shaped(text) => TargetQuery::Uuid(uuid),
                _ => TargetQuery::Name(text.clone()),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("no network player with uuid {0}")]
    UnknownUuid(PlayerUuid),
    #[error("no account named {0}")]
    UnknownName(String),
    #[error("{0} never joined the network")]
    NotTracked(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl TargetError {
    /// Network trouble as opposed to an answer about the player.
    pub fn is_technical(&self) -> bool {
        matches!(self, TargetError::Remote(_) | TargetError::Resolve(_))
    }

    /// The message shown to the invoker. `fallback_key` is used for technical failures.
    pub fn to_message(&self, ctx: &CommandContext, fallback_key: &str) -> Message {
        let error = ctx.error_message();
        let highlighted = |arg: String| -> Vec<MessageNode> {
            vec![Text::new(arg).color(MessageColor::Yellow).into()]
        };
        match self {
            TargetError::UnknownUuid(uuid) => {
                error.then_translate("lclp.player.not_found_uuid", highlighted(uuid.to_string()))
            }
            TargetError::UnknownName(name) => {
                error.then_translate("mc.player.not_found_name", highlighted(name.clone()))
            }
            TargetError::NotTracked(name) => {
                error.then_translate("lclp.player.not_found_name", highlighted(name.clone()))
            }
            TargetError::Remote(_) | TargetError::Resolve(_) => {
                error.then_translate(fallback_key, Vec::new())
            }
        }
    }
}

/// Resolves a query to a player known to the network.
///
/// The invoker and host resolved players need no lookup. Uuids and names
/// are checked against the cache before asking the service.
pub async fn resolve_target(
    ctx: &CommandContext,
    invoker: PlayerUuid,
    query: TargetQuery,
) -> Result<PlayerUuid, TargetError> {
    match query {
        TargetQuery::Invoker => Ok(invoker),
        TargetQuery::Player(uuid) => Ok(uuid),
        TargetQuery::Uuid(uuid) => {
            if ctx.cache.get(uuid).is_some() || ctx.client.get_player(uuid).await?.is_some() {
                Ok(uuid)
            } else {
                Err(TargetError::UnknownUuid(uuid))
            }
        }
        TargetQuery::Name(name) => {
            let Some(uuid) = ctx.resolver.username_to_uuid(&name).await? else {
                return Err(TargetError::UnknownName(name));
            };
            if ctx.cache.get(uuid).is_some() || ctx.client.get_player(uuid).await?.is_some() {
                Ok(uuid)
            } else {
                Err(TargetError::NotTracked(name))
            }
        }
    }
}
