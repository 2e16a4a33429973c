//! Process-local cache of player records and the registered languages.

use mcsapi_api::{PlayerRecord, PlayerUuid, RemoteResult, RemoteService};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Shared between the connection handlers and in-flight commands.
///
/// Records are replaced as a whole, never patched in place.
#[derive(Default)]
pub struct IdentityCache {
    players: RwLock<FxHashMap<PlayerUuid, PlayerRecord>>,
    /// `None` until the languages were fetched once.
    languages: RwLock<Option<FxHashSet<String>>>,
}

impl IdentityCache {
    pub fn new() -> IdentityCache {
        IdentityCache::default()
    }

    pub fn get(&self, uuid: PlayerUuid) -> Option<PlayerRecord> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        players.get(&uuid).cloned()
    }

    pub fn put(&self, record: PlayerRecord) {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        players.insert(record.uuid, record);
    }

    pub fn evict(&self, uuid: PlayerUuid) -> Option<PlayerRecord> {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        players.remove(&uuid)
    }

    pub fn len(&self) -> usize {
        self.players.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The registered languages in sorted order, `None` if they were never loaded.
    pub fn registered_languages(&self) -> Option<Vec<String>> {
        let languages = self.languages.read().unwrap_or_else(PoisonError::into_inner);
        languages.as_ref().map(|set| {
            let mut languages: Vec<String> = set.iter().cloned().collect();
            languages.sort();
            languages
        })
    }

    /// `None` if the languages were never loaded.
    pub fn is_language_registered(&self, lang: &str) -> Option<bool> {
        let languages = self.languages.read().unwrap_or_else(PoisonError::into_inner);
        languages.as_ref().map(|set| set.contains(lang))
    }

    pub fn set_registered_languages(&self, languages: impl IntoIterator<Item = String>) {
        let set = languages.into_iter().collect();
        *self.languages.write().unwrap_or_else(PoisonError::into_inner) = Some(set);
    }

    /// Replaces the registered languages. On failure the previous set is kept.
    pub async fn refresh_languages(&self, client: &dyn RemoteService) -> RemoteResult<usize> {
        let languages = client.registered_languages().await?;
        let count = languages.len();
        self.set_registered_languages(languages);
        debug!("Loaded {} registered languages", count);
        Ok(count)
    }

    /// Refetches a player record. Failures are logged and leave the cache unchanged.
    pub async fn refresh_player(&self, client: &dyn RemoteService, uuid: PlayerUuid) {
        match client.get_player(uuid).await {
            Ok(Some(record)) => self.put(record),
            Ok(None) => debug!("Player {} is not known to the network", uuid),
            Err(err) => debug!("Could not refresh player {}: {}", uuid, err),
        }
    }

    /// Runs [`IdentityCache::refresh_player`] in the background.
    pub fn spawn_refresh_player(self: &Arc<Self>, client: Arc<dyn RemoteService>, uuid: PlayerUuid) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No runtime to refresh player {} on", uuid);
            return;
        };
        let cache = Arc::clone(self);
        handle.spawn(async move {
            cache.refresh_player(client.as_ref(), uuid).await;
        });
    }

    /// Marks the player as seen and caches the record the service returns.
    pub async fn touch(&self, client: &dyn RemoteService, uuid: PlayerUuid) -> RemoteResult<PlayerRecord> {
        let record = client.touch_last_seen(uuid).await?;
        self.put(record.clone());
        Ok(record)
    }
}
