use super::target::{TargetQuery, resolve_target};
use super::{CommandContext, CommandScheme, Invocation};
use crate::messaging::StatsDisplay;
use async_trait::async_trait;
use mcsapi_api::PlayerUuid;
use mcsapi_text::{Message, MessageColor, Text};
use std::sync::Arc;
use tracing::debug;

/// `/stats [player]`: shows the statistics of the invoker or of another
/// player given by name or uuid.
pub struct StatsCommand {
    debug: bool,
    display: Arc<dyn StatsDisplay>,
}

impl StatsCommand {
    pub fn new(debug: bool, display: Arc<dyn StatsDisplay>) -> StatsCommand {
        StatsCommand { debug, display }
    }

    async fn display_name(&self, ctx: &CommandContext, target: PlayerUuid) -> String {
        match ctx.resolver.uuid_to_username(target).await {
            Ok(Some(name)) => name,
            Ok(None) => target.to_string(),
            Err(err) => {
                debug!("Could not look up the name of {}: {}", target, err);
                target.to_string()
            }
        }
    }

    async fn show(&self, ctx: &CommandContext, invoker: PlayerUuid, target: PlayerUuid) -> bool {
        let title = if target == invoker {
            ctx.reply(invoker, ctx.prefixed().then_translate("stats.loading_yours", Vec::new()));
            Message::blank().then_translate("stats.title.yours", Vec::new())
        } else {
            let name = self.display_name(ctx, target).await;
            ctx.reply(
                invoker,
                ctx.prefixed().then_translate(
                    "stats.loading",
                    vec![Text::new(name.clone()).color(MessageColor::Yellow).into()],
                ),
            );
            Message::blank().then_translate("stats.title.player", vec![Text::new(name).into()])
        };

        match ctx.client.get_stats(target).await {
            Ok(stats) => {
                self.display.open_stats(invoker, target, title, stats);
                true
            }
            Err(err) => {
                ctx.debug(self.debug, "Could not fetch stats", &err);
                ctx.error(invoker, "stats.error");
                false
            }
        }
    }
}

#[async_trait]
impl CommandScheme for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    async fn run(&self, ctx: &CommandContext, invocation: Invocation) -> bool {
        let invoker = invocation.player;
        let query = TargetQuery::classify(invocation.first());
        if let TargetQuery::Name(name) = &query {
            ctx.reply(
                invoker,
                ctx.prefixed().then_translate(
                    "mc.search_player",
                    vec![Text::new(name.clone()).color(MessageColor::Yellow).into()],
                ),
            );
        }

        let target = match resolve_target(ctx, invoker, query).await {
            Ok(target) => target,
            Err(err) => {
                if err.is_technical() {
                    ctx.debug(self.debug, "Could not resolve stats target", &err);
                }
                ctx.reply(invoker, err.to_message(ctx, "stats.error"));
                return false;
            }
        };

        self.show(ctx, invoker, target).await
    }
}
