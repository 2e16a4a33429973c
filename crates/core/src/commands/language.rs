use super::{Argument, CommandContext, CommandScheme, Invocation, UsageError, check_arity};
use async_trait::async_trait;
use mcsapi_api::{PlayerRecord, PlayerUuid};
use mcsapi_text::{Message, MessageColor, MessageNode, Text, Translation};
use std::sync::Arc;
use tracing::warn;

/// Selecting this language makes the client language win again.
pub const AUTO_LANGUAGE: &str = "auto";

/// `/language [lang]`: shows or changes the preferred network language.
pub struct LanguageCommand {
    debug: bool,
}

impl LanguageCommand {
    pub fn new(debug: bool) -> LanguageCommand {
        LanguageCommand { debug }
    }

    async fn show_current(&self, ctx: &CommandContext, player: PlayerUuid) -> bool {
        let record = match ctx.cache.get(player) {
            Some(record) => record,
            None => match ctx.client.get_player(player).await {
                Ok(Some(record)) => {
                    ctx.cache.put(record.clone());
                    record
                }
                Ok(None) => {
                    ctx.error(player, "netlang.error");
                    return false;
                }
                Err(err) => {
                    ctx.debug(self.debug, "Could not fetch player", &err);
                    ctx.error(player, "netlang.error");
                    return false;
                }
            },
        };

        ctx.reply(
            player,
            ctx.prefixed()
                .then_translate("netlang.current", vec![current_language(&record)]),
        );
        true
    }

    async fn change(&self, ctx: &CommandContext, player: PlayerUuid, lang: &str) -> bool {
        match ctx.cache.is_language_registered(lang) {
            None => {
                ctx.error(player, "netlang.error.not-editable");
                return false;
            }
            Some(false) => {
                ctx.reply(player, not_registered(ctx, lang));
                return false;
            }
            Some(true) => {}
        }

        match ctx.client.set_preferred_language(player, lang).await {
            Ok(true) => {
                ctx.reply(
                    player,
                    ctx.prefixed()
                        .then_translate("netlang.updated", vec![language_name(Some(lang))]),
                );
                ctx.cache
                    .spawn_refresh_player(Arc::clone(&ctx.client), player);
                true
            }
            Ok(false) => {
                ctx.reply(player, not_registered(ctx, lang));
                false
            }
            Err(err) => {
                ctx.debug(self.debug, "Could not set preferred language", &err);
                ctx.error(player, "netlang.error");
                false
            }
        }
    }
}

fn language_name(lang: Option<&str>) -> MessageNode {
    match lang {
        Some(lang) if lang != AUTO_LANGUAGE => Text::new(lang).color(MessageColor::Yellow).into(),
        _ => Translation::new("netlang.use-client", Vec::new())
            .color(MessageColor::Yellow)
            .local()
            .into(),
    }
}

fn current_language(record: &PlayerRecord) -> MessageNode {
    language_name(record.language.as_deref())
}

fn not_registered(ctx: &CommandContext, lang: &str) -> Message {
    ctx.error_message().then_translate(
        "netlang.error.lang-not-registered",
        vec![Text::new(lang).color(MessageColor::Yellow).into()],
    )
}

#[async_trait]
impl CommandScheme for LanguageCommand {
    fn name(&self) -> &'static str {
        "language"
    }

    fn validate(&self, invocation: &Invocation) -> Result<(), UsageError> {
        check_arity(self.name(), invocation, 1)?;
        match invocation.first() {
            Some(arg @ Argument::Player(_)) => Err(UsageError::UnsupportedArgument {
                command: self.name(),
                found: arg.kind(),
            }),
            _ => Ok(()),
        }
    }

    async fn run(&self, ctx: &CommandContext, invocation: Invocation) -> bool {
        let player = invocation.player;
        match invocation.first() {
            None => self.show_current(ctx, player).await,
            Some(Argument::Text(lang)) => self.change(ctx, player, lang).await,
            Some(Argument::Player(_)) => {
                warn!("/language ran with an unvalidated player argument");
                ctx.error(player, "netlang.error");
                false
            }
        }
    }
}
