use crate::error::{RemoteError, RemoteResult};
use crate::model::{
    IncrementResult, LinkOutcome, PlayerRecord, PlayerStats, TransactionResult,
};
use crate::response::{self, RawResponse};
use crate::transaction::StatTransaction;
use crate::uuid::PlayerUuid;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// The fixed set of operations offered by the network service.
///
/// Implementations do not retry. Technical failures surface as
/// [`RemoteError`], domain answers ("already linked", "language rejected")
/// as regular values.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Whether the player is a network operator. Unknown players are not.
    async fn is_operator(&self, uuid: PlayerUuid) -> RemoteResult<bool>;

    /// Updates the last seen time, creating the player if needed.
    async fn touch_last_seen(&self, uuid: PlayerUuid) -> RemoteResult<PlayerRecord>;

    async fn get_player(&self, uuid: PlayerUuid) -> RemoteResult<Option<PlayerRecord>>;

    async fn get_stats(&self, uuid: PlayerUuid) -> RemoteResult<PlayerStats>;

    /// Requests a reverse link token the player can open in a browser.
    async fn request_link_token(&self, uuid: PlayerUuid) -> RemoteResult<LinkOutcome>;

    /// Links the account of `uuid` using a token the player obtained on the website.
    async fn process_link_token(&self, uuid: PlayerUuid, token: &str) -> RemoteResult<()>;

    async fn increment_stats(
        &self,
        stat_type: &str,
        transaction: StatTransaction,
    ) -> RemoteResult<IncrementResult>;

    async fn registered_languages(&self) -> RemoteResult<Vec<String>>;

    /// `Ok(false)` when the service does not accept `lang`.
    async fn set_preferred_language(&self, uuid: PlayerUuid, lang: &str) -> RemoteResult<bool>;

    async fn ranked_players(&self, property: &str, count: u32) -> RemoteResult<Vec<PlayerRecord>>;

    /// Moves `amount` coins from `payer` to `recipient`, or to the server if
    /// there is no recipient.
    async fn make_coin_transaction(
        &self,
        payer: PlayerUuid,
        recipient: Option<PlayerUuid>,
        amount: i64,
        title: &str,
        title_is_translation_key: bool,
    ) -> RemoteResult<TransactionResult>;
}

/// [`RemoteService`] over HTTP with bearer token authentication.
pub struct HttpServiceClient {
    client: reqwest::Client,
    host: String,
    token: String,
}

impl HttpServiceClient {
    pub fn new(host: &str, token: &str, timeout: Duration) -> RemoteResult<HttpServiceClient> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RemoteError::Unreachable(err.to_string()))?;
        Ok(HttpServiceClient {
            client,
            host: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }

    async fn read(&self, request: reqwest::RequestBuilder, path: &str) -> RemoteResult<RawResponse> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{} -> {}", path, status);
        Ok(RawResponse { status, body })
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RemoteResult<RawResponse> {
        let request = self.client.post(self.url(path)).json(body);
        self.read(request, path).await
    }

    async fn get(&self, path: &str) -> RemoteResult<RawResponse> {
        let request = self.client.get(self.url(path));
        self.read(request, path).await
    }
}

#[async_trait]
impl RemoteService for HttpServiceClient {
    async fn is_operator(&self, uuid: PlayerUuid) -> RemoteResult<bool> {
        let body = json!({ "uuid": uuid });
        response::operator(self.post("api/mc/admin/is-network-operator", &body).await?)
    }

    async fn touch_last_seen(&self, uuid: PlayerUuid) -> RemoteResult<PlayerRecord> {
        let body = json!({ "uuid": uuid });
        response::player(self.post("api/mc/admin/update-last-seen", &body).await?)
    }

    async fn get_player(&self, uuid: PlayerUuid) -> RemoteResult<Option<PlayerRecord>> {
        let body = json!({ "uuid": uuid });
        response::optional_player(self.post("api/mc/admin/get-player", &body).await?)
    }

    async fn get_stats(&self, uuid: PlayerUuid) -> RemoteResult<PlayerStats> {
        let body = json!({ "uuid": uuid });
        response::ok_json(self.post("api/mc/admin/get-stats", &body).await?)
    }

    async fn request_link_token(&self, uuid: PlayerUuid) -> RemoteResult<LinkOutcome> {
        let body = json!({ "uuid": uuid });
        response::link_token(
            self.post("api/mc/admin/request-mclink-reverse-token", &body)
                .await?,
        )
    }

    async fn process_link_token(&self, uuid: PlayerUuid, token: &str) -> RemoteResult<()> {
        let body = json!({ "mcUuid": uuid, "token": token });
        response::created(self.post("api/mc/admin/process-mclink-token", &body).await?)
    }

    async fn increment_stats(
        &self,
        stat_type: &str,
        transaction: StatTransaction,
    ) -> RemoteResult<IncrementResult> {
        let body = json!({
            "statType": stat_type,
            "transactions": transaction.to_wire(),
        });
        response::ok_json(self.post("api/mc/admin/increment-stat", &body).await?)
    }

    async fn registered_languages(&self) -> RemoteResult<Vec<String>> {
        response::ok_json(self.get("api/mc/admin/get-registered-languages").await?)
    }

    async fn set_preferred_language(&self, uuid: PlayerUuid, lang: &str) -> RemoteResult<bool> {
        let body = json!({ "uuid": uuid, "lang": lang });
        response::language_set(self.post("api/mc/admin/set-preferred-language", &body).await?)
    }

    async fn ranked_players(&self, property: &str, count: u32) -> RemoteResult<Vec<PlayerRecord>> {
        let body = json!({ "property": property, "amount": count });
        response::ok_json(self.post("api/mc/admin/get-players-ranked", &body).await?)
    }

    async fn make_coin_transaction(
        &self,
        payer: PlayerUuid,
        recipient: Option<PlayerUuid>,
        amount: i64,
        title: &str,
        title_is_translation_key: bool,
    ) -> RemoteResult<TransactionResult> {
        let mut body = json!({
            "payer_uuid": payer,
            "amount": amount,
            "item_name": title,
            "is_name_translated": title_is_translation_key,
        });
        if let Some(recipient) = recipient {
            body["recipient_uuid"] = json!(recipient);
        }
        response::ok_or_created_json(
            self.post("api/mc/admin/make-coin-transaction", &body)
                .await?,
        )
    }
}
