#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use mcsapi_api::{
    INSUFFICIENT_FUNDS_MESSAGE, IncrementResult, LinkOutcome, PlayerRecord, PlayerStats,
    PlayerUuid, RemoteError, RemoteResult, RemoteService, StatTransaction, TransactionResult,
    TransactionStatus,
};
use mcsapi_core::commands::{Argument, CommandContext};
use mcsapi_core::{DebugSink, MessageSender, NameResolver, ResolveError, ServiceBridge, StatsDisplay};
use mcsapi_text::render::render_plain;
use mcsapi_text::{Message, MessageColor, MessageNode, Translator};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALICE: PlayerUuid = PlayerUuid(0x7357a549_fa3e_4342_91b2_63e5e73ed39a);
pub const BOB: PlayerUuid = PlayerUuid(0x069a79f4_44e9_4726_a5be_fca90e38aaf5);
pub const CAROL: PlayerUuid = PlayerUuid(0x853c80ef_3c37_49fd_aa49_938b674adae6);

pub fn record(uuid: PlayerUuid, language: Option<&str>) -> PlayerRecord {
    PlayerRecord {
        uuid,
        language: language.map(str::to_string),
        operator: None,
        last_seen: Utc::now(),
    }
}

pub fn stats(uuid: PlayerUuid, coins: i64) -> PlayerStats {
    let mut general = BTreeMap::new();
    general.insert("coins".to_string(), coins);
    let mut stats = BTreeMap::new();
    stats.insert("general".to_string(), general);
    PlayerStats { uuid, stats }
}

fn offline() -> RemoteError {
    RemoteError::Unreachable("connection refused".into())
}

/// In-memory network service.
#[derive(Default)]
pub struct FakeService {
    pub players: Mutex<HashMap<PlayerUuid, PlayerRecord>>,
    pub stats: Mutex<HashMap<PlayerUuid, PlayerStats>>,
    pub languages: Mutex<Vec<String>>,
    pub operators: Mutex<HashSet<PlayerUuid>>,
    pub coins: Mutex<HashMap<PlayerUuid, i64>>,
    linked: Mutex<HashSet<PlayerUuid>>,
    issued_tokens: AtomicUsize,
    pub reject_increments: AtomicBool,
    pub offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn with_player(self, record: PlayerRecord) -> Self {
        self.players.lock().unwrap().insert(record.uuid, record);
        self
    }

    pub fn with_stats(self, stats: PlayerStats) -> Self {
        self.stats.lock().unwrap().insert(stats.uuid, stats);
        self
    }

    pub fn with_languages(self, languages: &[&str]) -> Self {
        *self.languages.lock().unwrap() = languages.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_coins(self, uuid: PlayerUuid, coins: i64) -> Self {
        self.coins.lock().unwrap().insert(uuid, coins);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn call(&self, name: &str) -> RemoteResult<()> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteService for FakeService {
    async fn is_operator(&self, uuid: PlayerUuid) -> RemoteResult<bool> {
        self.call("is_operator")?;
        Ok(self.operators.lock().unwrap().contains(&uuid))
    }

    async fn touch_last_seen(&self, uuid: PlayerUuid) -> RemoteResult<PlayerRecord> {
        self.call("touch_last_seen")?;
        let mut players = self.players.lock().unwrap();
        let record = players.entry(uuid).or_insert_with(|| record(uuid, None));
        record.last_seen = Utc::now();
        Ok(record.clone())
    }

    async fn get_player(&self, uuid: PlayerUuid) -> RemoteResult<Option<PlayerRecord>> {
        self.call("get_player")?;
        Ok(self.players.lock().unwrap().get(&uuid).cloned())
    }

    async fn get_stats(&self, uuid: PlayerUuid) -> RemoteResult<PlayerStats> {
        self.call("get_stats")?;
        self.stats
            .lock()
            .unwrap()
            .get(&uuid)
            .cloned()
            .ok_or(RemoteError::UnexpectedStatus {
                status: 404,
                body: String::new(),
            })
    }

    async fn request_link_token(&self, uuid: PlayerUuid) -> RemoteResult<LinkOutcome> {
        self.call("request_link_token")?;
        if self.linked.lock().unwrap().contains(&uuid) {
            return Ok(LinkOutcome::AlreadyLinked);
        }
        let n = self.issued_tokens.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(LinkOutcome::Token(format!("token-{}", n)))
    }

    async fn process_link_token(&self, uuid: PlayerUuid, _token: &str) -> RemoteResult<()> {
        self.call("process_link_token")?;
        self.linked.lock().unwrap().insert(uuid);
        Ok(())
    }

    async fn increment_stats(
        &self,
        _stat_type: &str,
        transaction: StatTransaction,
    ) -> RemoteResult<IncrementResult> {
        self.call("increment_stats")?;
        if self.reject_increments.load(Ordering::SeqCst) {
            return Ok(IncrementResult { success: false });
        }
        let mut coins = self.coins.lock().unwrap();
        for uuid in transaction.players() {
            if let Some(item) = transaction.get(uuid, "coins") {
                *coins.entry(uuid).or_default() += item.amount;
            }
        }
        Ok(IncrementResult { success: true })
    }

    async fn registered_languages(&self) -> RemoteResult<Vec<String>> {
        self.call("registered_languages")?;
        Ok(self.languages.lock().unwrap().clone())
    }

    async fn set_preferred_language(&self, uuid: PlayerUuid, lang: &str) -> RemoteResult<bool> {
        self.call("set_preferred_language")?;
        if !self.languages.lock().unwrap().iter().any(|l| l == lang) {
            return Ok(false);
        }
        let language = (lang != "auto").then(|| lang.to_string());
        let mut players = self.players.lock().unwrap();
        players.entry(uuid).or_insert_with(|| record(uuid, None)).language = language;
        Ok(true)
    }

    async fn ranked_players(&self, _property: &str, count: u32) -> RemoteResult<Vec<PlayerRecord>> {
        self.call("ranked_players")?;
        let mut players: Vec<PlayerRecord> = self.players.lock().unwrap().values().cloned().collect();
        players.sort_by_key(|p| p.uuid);
        players.truncate(count as usize);
        Ok(players)
    }

    async fn make_coin_transaction(
        &self,
        payer: PlayerUuid,
        recipient: Option<PlayerUuid>,
        amount: i64,
        _title: &str,
        _title_is_translation_key: bool,
    ) -> RemoteResult<TransactionResult> {
        self.call("make_coin_transaction")?;
        let mut coins = self.coins.lock().unwrap();
        let Some(balance) = coins.get(&payer).copied() else {
            return Ok(TransactionResult {
                status: TransactionStatus::Failure,
                message: Some("Unknown payer.".into()),
            });
        };
        if balance < amount {
            return Ok(TransactionResult {
                status: TransactionStatus::Failure,
                message: Some(INSUFFICIENT_FUNDS_MESSAGE.into()),
            });
        }
        coins.insert(payer, balance.saturating_sub(amount));
        if let Some(recipient) = recipient {
            let entry = coins.entry(recipient).or_default();
            *entry = entry.saturating_add(amount);
        }
        Ok(TransactionResult {
            status: TransactionStatus::Success,
            message: None,
        })
    }
}

#[derive(Default)]
pub struct FakeResolver {
    names: Mutex<HashMap<String, (PlayerUuid, String)>>,
    lookups: AtomicUsize,
}

impl FakeResolver {
    pub fn with_account(self, name: &str, uuid: PlayerUuid) -> Self {
        self.names
            .lock()
            .unwrap()
            .insert(name.to_lowercase(), (uuid, name.to_string()));
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameResolver for FakeResolver {
    async fn username_to_uuid(&self, username: &str) -> Result<Option<PlayerUuid>, ResolveError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let names = self.names.lock().unwrap();
        Ok(names.get(&username.to_lowercase()).map(|(uuid, _)| *uuid))
    }

    async fn uuid_to_username(&self, uuid: PlayerUuid) -> Result<Option<String>, ResolveError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let names = self.names.lock().unwrap();
        Ok(names
            .values()
            .find(|(known, _)| *known == uuid)
            .map(|(_, name)| name.clone()))
    }
}

/// Renders keys instead of translations: `key` or `key(sub1,sub2)`.
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, _locale: &str, key: &str, substitutes: &[String]) -> String {
        if substitutes.is_empty() {
            key.to_string()
        } else {
            format!("{}({})", key, substitutes.join(","))
        }
    }

    fn has_translation(&self, _locale: &str, _key: &str) -> bool {
        true
    }
}

pub fn plain(message: &Message) -> String {
    render_plain(&MessageNode::Message(message.clone()), "en_us", &KeyTranslator)
}

#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(PlayerUuid, Message)>>,
}

impl RecordingSender {
    pub fn messages_for(&self, player: PlayerUuid) -> Vec<Message> {
        let sent = self.sent.lock().unwrap();
        sent.iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn lines_for(&self, player: PlayerUuid) -> Vec<String> {
        self.messages_for(player).iter().map(plain).collect()
    }

    pub fn errors_for(&self, player: PlayerUuid) -> Vec<String> {
        self.messages_for(player)
            .iter()
            .filter(|message| message.style().color == MessageColor::Red)
            .map(plain)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MessageSender for RecordingSender {
    fn send(&self, player: PlayerUuid, message: Message) {
        self.sent.lock().unwrap().push((player, message));
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    opened: Mutex<Vec<(PlayerUuid, PlayerUuid, String, PlayerStats)>>,
}

impl RecordingDisplay {
    pub fn opened(&self) -> Vec<(PlayerUuid, PlayerUuid, String, PlayerStats)> {
        self.opened.lock().unwrap().clone()
    }
}

impl StatsDisplay for RecordingDisplay {
    fn open_stats(&self, invoker: PlayerUuid, target: PlayerUuid, title: Message, stats: PlayerStats) {
        let title = plain(&title);
        self.opened.lock().unwrap().push((invoker, target, title, stats));
    }
}

#[derive(Default)]
pub struct RecordingDebugSink {
    logged: Mutex<Vec<String>>,
}

impl RecordingDebugSink {
    pub fn logged(&self) -> Vec<String> {
        self.logged.lock().unwrap().clone()
    }
}

impl DebugSink for RecordingDebugSink {
    fn log_error(&self, context: &str, error: &dyn Error) {
        self.logged.lock().unwrap().push(format!("{}: {}", context, error));
    }
}

pub struct Harness {
    pub service: Arc<FakeService>,
    pub resolver: Arc<FakeResolver>,
    pub sender: Arc<RecordingSender>,
    pub display: Arc<RecordingDisplay>,
    pub debug: Arc<RecordingDebugSink>,
    pub bridge: ServiceBridge,
}

impl Harness {
    pub fn new(service: FakeService, resolver: FakeResolver) -> Harness {
        let service = Arc::new(service);
        let resolver = Arc::new(resolver);
        let sender = Arc::new(RecordingSender::default());
        let display = Arc::new(RecordingDisplay::default());
        let debug = Arc::new(RecordingDebugSink::default());

        let ctx = CommandContext::new(
            service.clone(),
            Arc::default(),
            resolver.clone(),
            sender.clone(),
        )
        .with_prefix("LCLPNetwork")
        .with_link_host("https://lclpnet.work/")
        .with_debug_sink(debug.clone());
        let bridge = ServiceBridge::with_context(ctx, true, display.clone());

        Harness {
            service,
            resolver,
            sender,
            display,
            debug,
            bridge,
        }
    }

    pub async fn run(&self, command: &str, player: PlayerUuid, args: Vec<Argument>) -> bool {
        self.bridge
            .execute(command, player, args)
            .expect("valid invocation")
            .await
    }

    /// Waits for background refreshes to land in the cache.
    pub async fn wait_for<F: Fn(&Harness) -> bool>(&self, condition: F) -> bool {
        for _ in 0..100 {
            if condition(self) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        condition(self)
    }
}
