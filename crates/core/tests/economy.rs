mod common;

use common::{ALICE, BOB, CAROL, FakeResolver, FakeService, Harness};
use mcsapi_api::StatTransaction;
use mcsapi_api::transaction::stat_types;
use mcsapi_core::economy;
use mcsapi_text::MessageColor;
use std::sync::atomic::Ordering;

fn rewards() -> StatTransaction {
    let mut transaction = StatTransaction::new();
    transaction
        .add_coins(ALICE, 5, "game.reward", true)
        .add_points(BOB, -3)
        .add(CAROL, "wins", 1);
    transaction
}

#[tokio::test]
async fn granted_rewards_are_announced() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());

    assert!(harness.bridge.grant(stat_types::CURRENCY, rewards()).await);

    assert_eq!(
        harness.sender.lines_for(ALICE),
        vec!["LCLPNetwork> +5 stat.general.coins"]
    );
    assert_eq!(
        harness.sender.lines_for(BOB),
        vec!["LCLPNetwork> -3 stat.general.points"]
    );
    assert_eq!(
        harness.sender.lines_for(CAROL),
        vec!["LCLPNetwork> +1 stat.currency.wins"]
    );
    assert_eq!(*harness.service.coins.lock().unwrap().get(&ALICE).unwrap(), 5);
}

#[tokio::test]
async fn rejected_increment_is_one_error_per_player() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());
    harness.service.reject_increments.store(true, Ordering::SeqCst);

    assert!(!harness.bridge.grant(stat_types::CURRENCY, rewards()).await);

    for player in [ALICE, BOB, CAROL] {
        assert_eq!(
            harness.sender.lines_for(player),
            vec!["LCLPNetwork> stats.increment.error"]
        );
        assert_eq!(harness.sender.errors_for(player).len(), 1);
    }
}

#[tokio::test]
async fn increment_while_service_is_down() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());
    harness.service.set_offline(true);

    assert!(!harness.bridge.grant(stat_types::CURRENCY, rewards()).await);

    assert_eq!(harness.sender.errors_for(ALICE).len(), 1);
    assert_eq!(harness.sender.total(), 3);
    assert_eq!(harness.debug.logged().len(), 1);
}

#[tokio::test]
async fn empty_transaction_is_not_sent() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());

    assert!(harness.bridge.grant(stat_types::CURRENCY, StatTransaction::new()).await);
    assert!(harness.service.calls().is_empty());
}

#[test]
fn zero_change_has_no_message() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());
    let ctx = harness.bridge.context();

    assert!(economy::stat_change_message(ctx, economy::COINS_KEY, 0).is_none());
    economy::send_points_change(ctx, ALICE, 0);
    assert_eq!(harness.sender.total(), 0);

    let loss = economy::stat_change_message(ctx, economy::COINS_KEY, -2).unwrap();
    assert_eq!(common::plain(&loss), "LCLPNetwork> -2 stat.general.coins");
    assert_eq!(loss.style().color, MessageColor::Gray);
}

#[tokio::test]
async fn coin_purchase_moves_coins() {
    let harness = Harness::new(
        FakeService::default().with_coins(ALICE, 50),
        FakeResolver::default(),
    );

    assert!(harness.bridge.pay(ALICE, Some(BOB), 20, "shop.hat", true).await);

    assert_eq!(
        harness.sender.lines_for(ALICE),
        vec!["LCLPNetwork> -20 stat.general.coins"]
    );
    assert_eq!(
        harness.sender.lines_for(BOB),
        vec!["LCLPNetwork> +20 stat.general.coins"]
    );
}

#[tokio::test]
async fn coin_purchase_at_lowest_amount() {
    let harness = Harness::new(
        FakeService::default().with_coins(ALICE, 0),
        FakeResolver::default(),
    );

    assert!(harness.bridge.pay(ALICE, Some(BOB), i64::MIN, "refund", true).await);

    assert_eq!(
        harness.sender.lines_for(ALICE),
        vec![format!("LCLPNetwork> +{} stat.general.coins", i64::MAX)]
    );
    assert_eq!(
        harness.sender.lines_for(BOB),
        vec![format!("LCLPNetwork> {} stat.general.coins", i64::MIN)]
    );
}

#[tokio::test]
async fn coin_purchase_without_enough_coins() {
    let harness = Harness::new(
        FakeService::default().with_coins(ALICE, 5),
        FakeResolver::default(),
    );

    assert!(!harness.bridge.pay(ALICE, None, 20, "Hat", false).await);

    assert_eq!(
        harness.sender.errors_for(ALICE),
        vec!["LCLPNetwork> coins.insufficient(20)"]
    );
}

#[tokio::test]
async fn coin_purchase_rejected_for_other_reasons() {
    let harness = Harness::new(FakeService::default(), FakeResolver::default());

    assert!(!harness.bridge.pay(BOB, None, 1, "Hat", false).await);

    assert_eq!(
        harness.sender.errors_for(BOB),
        vec!["LCLPNetwork> coins.transaction.error"]
    );
    assert!(harness.debug.logged().is_empty());
}
