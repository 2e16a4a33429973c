use async_trait::async_trait;
use mcsapi_api::PlayerUuid;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const PROFILES_URL: &str = "https://api.mojang.com/users/profiles/minecraft";
const SESSIONS_URL: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("name lookup failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("name lookup answered with status {0}")]
    Status(u16),
}

/// Maps between usernames and uuids. `Ok(None)` means no such account.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn username_to_uuid(&self, username: &str) -> Result<Option<PlayerUuid>, ResolveError>;

    async fn uuid_to_username(&self, uuid: PlayerUuid) -> Result<Option<String>, ResolveError>;
}

#[derive(Debug, Deserialize)]
pub struct PlayerProfile {
    #[serde(rename = "id")]
    pub uuid: PlayerUuid,
    #[serde(rename = "name")]
    pub username: String,
}

/// Looks names up with the public Mojang profile API.
pub struct MojangResolver {
    client: reqwest::Client,
    profiles_url: String,
    sessions_url: String,
}

impl MojangResolver {
    pub fn new(timeout: Duration) -> Result<MojangResolver, ResolveError> {
        Self::with_urls(timeout, PROFILES_URL, SESSIONS_URL)
    }

    pub fn with_urls(
        timeout: Duration,
        profiles_url: &str,
        sessions_url: &str,
    ) -> Result<MojangResolver, ResolveError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(MojangResolver {
            client,
            profiles_url: profiles_url.trim_end_matches('/').to_string(),
            sessions_url: sessions_url.trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, url: String) -> Result<Option<PlayerProfile>, ResolveError> {
        let res = self.client.get(&url).send().await?;
        let status = res.status();
        debug!("{} -> {}", url, status);
        // Unknown names answer with an empty 204 or a 404 depending on the endpoint
        if status.as_u16() == 204 || status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }
        Ok(Some(res.json::<PlayerProfile>().await?))
    }
}

#[async_trait]
impl NameResolver for MojangResolver {
    async fn username_to_uuid(&self, username: &str) -> Result<Option<PlayerUuid>, ResolveError> {
        let url = format!("{}/{}", self.profiles_url, username);
        Ok(self.lookup(url).await?.map(|profile| profile.uuid))
    }

    async fn uuid_to_username(&self, uuid: PlayerUuid) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/{}", self.sessions_url, uuid.simple());
        Ok(self.lookup(url).await?.map(|profile| profile.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_uses_undashed_id() {
        let profile: PlayerProfile = serde_json::from_str(
            r#"{"id":"7357a549fa3e434291b263e5e73ed39a","name":"LCLP"}"#,
        )
        .unwrap();
        assert_eq!(profile.username, "LCLP");
        assert_eq!(
            profile.uuid.to_string(),
            "7357a549-fa3e-4342-91b2-63e5e73ed39a"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let resolver = MojangResolver::with_urls(
            Duration::from_secs(2),
            "http://127.0.0.1:1/profiles",
            "http://127.0.0.1:1/sessions",
        )
        .unwrap();
        assert!(matches!(
            resolver.username_to_uuid("LCLP").await,
            Err(ResolveError::Request(_))
        ));
    }
}
