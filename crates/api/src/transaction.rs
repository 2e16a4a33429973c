use crate::uuid::PlayerUuid;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

pub mod stat_types {
    pub const CURRENCY: &str = "currency";
}

pub mod stat_items {
    pub const COINS: &str = "coins";
    pub const POINTS: &str = "points";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatItem {
    pub amount: i64,
    pub extra: Option<Map<String, Value>>,
}

/// Stat increments for many players, submitted in one request.
///
/// Adding the same player and item type twice sums the amounts. Extra
/// metadata is replaced by the latest write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTransaction {
    entries: IndexMap<PlayerUuid, IndexMap<String, StatItem>>,
}

impl StatTransaction {
    pub fn new() -> StatTransaction {
        StatTransaction::default()
    }

    pub fn add(&mut self, uuid: PlayerUuid, item_type: impl Into<String>, amount: i64) -> &mut Self {
        self.item_mut(uuid, item_type).amount += amount;
        self
    }

    pub fn add_with_extra(
        &mut self,
        uuid: PlayerUuid,
        item_type: impl Into<String>,
        amount: i64,
        extra: Map<String, Value>,
    ) -> &mut Self {
        let item = self.item_mut(uuid, item_type);
        item.amount += amount;
        item.extra = Some(extra);
        self
    }

    /// Coins with a transaction title that is stored by the service. The
    /// title can be a translation key when `translated` is set.
    pub fn add_coins(
        &mut self,
        uuid: PlayerUuid,
        amount: i64,
        title: impl Into<String>,
        translated: bool,
    ) -> &mut Self {
        let mut extra = Map::new();
        extra.insert("name".into(), Value::String(title.into()));
        extra.insert("translated".into(), Value::Bool(translated));
        self.add_with_extra(uuid, stat_items::COINS, amount, extra)
    }

    pub fn add_points(&mut self, uuid: PlayerUuid, amount: i64) -> &mut Self {
        self.add(uuid, stat_items::POINTS, amount)
    }

    fn item_mut(&mut self, uuid: PlayerUuid, item_type: impl Into<String>) -> &mut StatItem {
        self.entries
            .entry(uuid)
            .or_default()
            .entry(item_type.into())
            .or_default()
    }

    pub fn get(&self, uuid: PlayerUuid, item_type: &str) -> Option<&StatItem> {
        self.entries.get(&uuid)?.get(item_type)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerUuid> + '_ {
        self.entries.keys().copied()
    }

    pub fn items_for(&self, uuid: PlayerUuid) -> impl Iterator<Item = (&str, &StatItem)> + '_ {
        self.entries
            .get(&uuid)
            .into_iter()
            .flat_map(|items| items.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The per-player entries in the shape the increment endpoint expects.
    pub fn to_wire(&self) -> Vec<IncrementEntry<'_>> {
        self.entries
            .iter()
            .map(|(uuid, items)| IncrementEntry {
                uuid: *uuid,
                items: items
                    .iter()
                    .map(|(item_type, item)| IncrementItem {
                        item_type,
                        amount: item.amount,
                        extra: item.extra.as_ref(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct IncrementEntry<'a> {
    pub uuid: PlayerUuid,
    pub items: Vec<IncrementItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct IncrementItem<'a> {
    #[serde(rename = "type")]
    pub item_type: &'a str,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<&'a Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uuid(n: u128) -> PlayerUuid {
        PlayerUuid(n)
    }

    #[test]
    fn same_pair_accumulates() {
        let mut transaction = StatTransaction::new();
        transaction.add(uuid(1), "kills", 3).add(uuid(1), "kills", 4);

        assert_eq!(transaction.len(), 1);
        assert_eq!(transaction.items_for(uuid(1)).count(), 1);
        assert_eq!(transaction.get(uuid(1), "kills").map(|i| i.amount), Some(7));
    }

    #[test]
    fn negative_amounts_sum() {
        let mut transaction = StatTransaction::new();
        transaction.add_points(uuid(1), 10).add_points(uuid(1), -15);
        assert_eq!(
            transaction.get(uuid(1), stat_items::POINTS).map(|i| i.amount),
            Some(-5)
        );
    }

    #[test]
    fn extra_is_last_write_wins() {
        let mut transaction = StatTransaction::new();
        transaction
            .add_coins(uuid(2), 5, "first", false)
            .add_coins(uuid(2), 6, "game.reward", true);

        let item = transaction.get(uuid(2), stat_items::COINS).unwrap();
        assert_eq!(item.amount, 11);
        let extra = item.extra.as_ref().unwrap();
        assert_eq!(extra["name"], json!("game.reward"));
        assert_eq!(extra["translated"], json!(true));
    }

    #[test]
    fn wire_shape() {
        let mut transaction = StatTransaction::new();
        transaction.add_points(uuid(1), 2).add(uuid(3), "wins", 1);

        let wire = serde_json::to_value(transaction.to_wire()).unwrap();
        assert_eq!(
            wire,
            json!([
                {"uuid": "00000000-0000-0000-0000-000000000001", "items": [{"type": "points", "amount": 2}]},
                {"uuid": "00000000-0000-0000-0000-000000000003", "items": [{"type": "wins", "amount": 1}]},
            ])
        );
    }
}
