//! Stat rewards and coin purchases with feedback to the affected players.

use crate::commands::CommandContext;
use mcsapi_api::transaction::stat_items;
use mcsapi_api::{PlayerUuid, StatTransaction};
use mcsapi_text::{Message, MessageColor, Text};
use tracing::debug;

pub const COINS_KEY: &str = "stat.general.coins";
pub const POINTS_KEY: &str = "stat.general.points";

/// `"+5 Coins"` in gray or `"-5 Coins"` in red. `None` for a zero change.
pub fn stat_change_message(ctx: &CommandContext, stat_key: &str, amount: i64) -> Option<Message> {
    if amount == 0 {
        return None;
    }
    let (sign, color) = if amount > 0 {
        ("+", MessageColor::Gray)
    } else {
        ("", MessageColor::Red)
    };
    Some(
        ctx.prefixed().then(
            Message::blank()
                .then(Text::new(format!("{}{} ", sign, amount)).inherit())
                .then_translate(stat_key, Vec::new())
                .color(color),
        ),
    )
}

pub fn send_stat_change(ctx: &CommandContext, player: PlayerUuid, stat_key: &str, amount: i64) {
    if let Some(message) = stat_change_message(ctx, stat_key, amount) {
        ctx.reply(player, message);
    }
}

pub fn send_coins_change(ctx: &CommandContext, player: PlayerUuid, amount: i64) {
    send_stat_change(ctx, player, COINS_KEY, amount);
}

pub fn send_points_change(ctx: &CommandContext, player: PlayerUuid, amount: i64) {
    send_stat_change(ctx, player, POINTS_KEY, amount);
}

/// The translation key for a stat item.
pub fn stat_key(stat_type: &str, item_type: &str) -> String {
    match item_type {
        stat_items::COINS => COINS_KEY.to_string(),
        stat_items::POINTS => POINTS_KEY.to_string(),
        other => format!("stat.{}.{}", stat_type, other),
    }
}

/// Submits stat transactions and tells every affected player about it.
pub struct StatRewards {
    debug: bool,
}

impl StatRewards {
    pub fn new(debug: bool) -> StatRewards {
        StatRewards { debug }
    }

    /// On success each player sees one change line per item. On failure each
    /// player sees exactly one error message.
    pub async fn grant(&self, ctx: &CommandContext, stat_type: &str, transaction: StatTransaction) -> bool {
        if transaction.is_empty() {
            return true;
        }
        let changes: Vec<(PlayerUuid, Vec<(String, i64)>)> = transaction
            .players()
            .map(|uuid| {
                let items = transaction
                    .items_for(uuid)
                    .map(|(item_type, item)| (stat_key(stat_type, item_type), item.amount))
                    .collect();
                (uuid, items)
            })
            .collect();

        let succeeded = match ctx.client.increment_stats(stat_type, transaction).await {
            Ok(result) => result.success,
            Err(err) => {
                ctx.debug(self.debug, "Could not increment stats", &err);
                false
            }
        };

        for (player, items) in changes {
            if succeeded {
                for (key, amount) in items {
                    send_stat_change(ctx, player, &key, amount);
                }
            } else {
                ctx.error(player, "stats.increment.error");
            }
        }
        succeeded
    }
}

/// Spends coins of a player.
pub struct CoinPurchases {
    debug: bool,
}

impl CoinPurchases {
    pub fn new(debug: bool) -> CoinPurchases {
        CoinPurchases { debug }
    }

    /// Moves `amount` coins from `payer` to `recipient`, or to the server.
    /// A payer who cannot afford it gets a dedicated message.
    pub async fn pay(
        &self,
        ctx: &CommandContext,
        payer: PlayerUuid,
        recipient: Option<PlayerUuid>,
        amount: i64,
        title: &str,
        title_is_translation_key: bool,
    ) -> bool {
        let result = ctx
            .client
            .make_coin_transaction(payer, recipient, amount, title, title_is_translation_key)
            .await;

        match result {
            Ok(result) if result.is_success() => {
                send_coins_change(ctx, payer, amount.saturating_neg());
                if let Some(recipient) = recipient {
                    send_coins_change(ctx, recipient, amount);
                }
                true
            }
            Ok(result) if result.is_insufficient_funds() => {
                ctx.reply(
                    payer,
                    ctx.error_message().then_translate(
                        "coins.insufficient",
                        vec![Text::new(amount.to_string()).color(MessageColor::Yellow).into()],
                    ),
                );
                false
            }
            Ok(result) => {
                debug!("Coin transaction of {} was rejected: {:?}", payer, result.message);
                ctx.error(payer, "coins.transaction.error");
                false
            }
            Err(err) => {
                ctx.debug(self.debug, "Could not make coin transaction", &err);
                ctx.error(payer, "coins.transaction.error");
                false
            }
        }
    }
}
