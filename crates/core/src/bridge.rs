//! Entry points a host platform drives: startup, joins, quits and commands.

use crate::cache::IdentityCache;
use crate::commands::{
    Argument, CommandContext, CommandFuture, CommandRegistry, LanguageCommand, LinkCommand,
    StatsCommand, UsageError,
};
use crate::config::ServiceConfig;
use crate::economy::{CoinPurchases, StatRewards};
use crate::messaging::{MessageSender, StatsDisplay};
use crate::resolver::NameResolver;
use mcsapi_api::{PlayerRecord, PlayerUuid, RemoteResult, RemoteService, StatTransaction};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ServiceBridge {
    ctx: CommandContext,
    registry: CommandRegistry,
    rewards: StatRewards,
    purchases: CoinPurchases,
}

impl ServiceBridge {
    pub fn new(
        config: &ServiceConfig,
        client: Arc<dyn RemoteService>,
        cache: Arc<IdentityCache>,
        resolver: Arc<dyn NameResolver>,
        sender: Arc<dyn MessageSender>,
        display: Arc<dyn StatsDisplay>,
    ) -> ServiceBridge {
        let ctx = CommandContext::new(client, cache, resolver, sender)
            .with_prefix(config.message_prefix.clone())
            .with_link_host(&config.api_host);
        Self::with_context(ctx, config.debug, display)
    }

    pub fn with_context(ctx: CommandContext, debug: bool, display: Arc<dyn StatsDisplay>) -> ServiceBridge {
        let mut registry = CommandRegistry::new();
        registry.register(LanguageCommand::new(debug));
        registry.register(LinkCommand::new(debug));
        registry.register(StatsCommand::new(debug, display));
        registry.add_alias("lang", "language");
        registry.add_alias("link", "mclink");

        ServiceBridge {
            ctx,
            registry,
            rewards: StatRewards::new(debug),
            purchases: CoinPurchases::new(debug),
        }
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    pub fn cache(&self) -> &Arc<IdentityCache> {
        &self.ctx.cache
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Loads the registered languages. Until this succeeds players cannot
    /// change their language.
    pub async fn start(&self) -> bool {
        match self.ctx.cache.refresh_languages(self.ctx.client.as_ref()).await {
            Ok(count) => {
                info!("Network service ready, {} languages registered", count);
                true
            }
            Err(err) => {
                warn!("Could not load registered languages: {}", err);
                false
            }
        }
    }

    /// Marks the player as seen and caches their record.
    pub async fn on_join(&self, player: PlayerUuid) -> Option<PlayerRecord> {
        match self.ctx.cache.touch(self.ctx.client.as_ref(), player).await {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Could not update last seen of {}: {}", player, err);
                None
            }
        }
    }

    pub fn on_quit(&self, player: PlayerUuid) {
        self.ctx.cache.evict(player);
    }

    pub fn execute(
        &self,
        command: &str,
        player: PlayerUuid,
        args: Vec<Argument>,
    ) -> Result<CommandFuture<'_>, UsageError> {
        self.registry.execute(&self.ctx, command, player, args)
    }

    /// Asks the service and stores the answer in the cached record, if any.
    pub async fn is_operator(&self, player: PlayerUuid) -> RemoteResult<bool> {
        let operator = self.ctx.client.is_operator(player).await?;
        if let Some(record) = self.ctx.cache.get(player) {
            self.ctx.cache.put(PlayerRecord {
                operator: Some(operator),
                ..record
            });
        }
        Ok(operator)
    }

    pub async fn top(&self, property: &str, count: u32) -> RemoteResult<Vec<PlayerRecord>> {
        self.ctx.client.ranked_players(property, count).await
    }

    pub async fn grant(&self, stat_type: &str, transaction: StatTransaction) -> bool {
        self.rewards.grant(&self.ctx, stat_type, transaction).await
    }

    pub async fn pay(
        &self,
        payer: PlayerUuid,
        recipient: Option<PlayerUuid>,
        amount: i64,
        title: &str,
        title_is_translation_key: bool,
    ) -> bool {
        self.purchases
            .pay(&self.ctx, payer, recipient, amount, title, title_is_translation_key)
            .await
    }

    /// Links the account using a token shown on the website.
    pub async fn process_link_token(&self, player: PlayerUuid, token: &str) -> RemoteResult<()> {
        self.ctx.client.process_link_token(player, token).await
    }
}
