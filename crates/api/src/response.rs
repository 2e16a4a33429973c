//! Maps raw service responses onto typed outcomes.

use crate::error::{RemoteError, RemoteResult, ValidationErrors};
use crate::model::{LinkOutcome, PlayerRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const ALREADY_LINKED_MESSAGE: &str = "The uuid has already been taken.";

const OK: u16 = 200;
const CREATED: u16 = 201;
const NOT_FOUND: u16 = 404;
const UNPROCESSABLE: u16 = 422;

/// A status code and body as received from the service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> RawResponse {
        RawResponse {
            status,
            body: body.into(),
        }
    }

    fn validation(&self) -> Option<ValidationErrors> {
        if self.status != UNPROCESSABLE {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }

    /// The error for a response that was not accepted by the caller.
    pub fn into_error(self) -> RemoteError {
        match self.status {
            401 => RemoteError::Unauthenticated,
            403 => RemoteError::Unauthorized,
            UNPROCESSABLE => RemoteError::Validation(self.validation().unwrap_or_default()),
            status => RemoteError::UnexpectedStatus {
                status,
                body: self.body,
            },
        }
    }

    pub fn json<T: DeserializeOwned>(&self, accepted: &[u16]) -> RemoteResult<T> {
        if !accepted.contains(&self.status) {
            return Err(self.clone().into_error());
        }
        serde_json::from_str(&self.body).map_err(|err| RemoteError::InvalidResponse(err.to_string()))
    }
}

#[derive(Deserialize)]
struct OperatorBody {
    op: Option<bool>,
}

#[derive(Deserialize)]
struct PlayerBody {
    player: Option<PlayerRecord>,
}

#[derive(Deserialize)]
struct TokenBody {
    token: Option<String>,
}

pub fn operator(response: RawResponse) -> RemoteResult<bool> {
    if response.status == NOT_FOUND {
        return Ok(false);
    }
    response
        .json::<OperatorBody>(&[OK])?
        .op
        .ok_or_else(|| RemoteError::InvalidResponse("missing field `op`".into()))
}

pub fn player(response: RawResponse) -> RemoteResult<PlayerRecord> {
    response
        .json::<PlayerBody>(&[OK])?
        .player
        .ok_or_else(|| RemoteError::InvalidResponse("missing field `player`".into()))
}

pub fn optional_player(response: RawResponse) -> RemoteResult<Option<PlayerRecord>> {
    if response.status == NOT_FOUND {
        return Ok(None);
    }
    Ok(response.json::<PlayerBody>(&[OK])?.player)
}

pub fn link_token(response: RawResponse) -> RemoteResult<LinkOutcome> {
    if let Some(errors) = response.validation() {
        if errors.has("uuid", ALREADY_LINKED_MESSAGE) {
            return Ok(LinkOutcome::AlreadyLinked);
        }
    }
    response
        .json::<TokenBody>(&[CREATED])?
        .token
        .map(LinkOutcome::Token)
        .ok_or_else(|| RemoteError::InvalidResponse("missing field `token`".into()))
}

pub fn created(response: RawResponse) -> RemoteResult<()> {
    if response.status == CREATED {
        Ok(())
    } else {
        Err(response.into_error())
    }
}

/// `false` when the service rejected the language itself.
pub fn language_set(response: RawResponse) -> RemoteResult<bool> {
    if response.status == OK {
        return Ok(true);
    }
    if let Some(errors) = response.validation() {
        if errors.has_field("lang") {
            return Ok(false);
        }
    }
    Err(response.into_error())
}

pub fn ok_json<T: DeserializeOwned>(response: RawResponse) -> RemoteResult<T> {
    response.json(&[OK])
}

pub fn ok_or_created_json<T: DeserializeOwned>(response: RawResponse) -> RemoteResult<T> {
    response.json(&[OK, CREATED])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncrementResult, TransactionResult};

    const RECORD: &str = r#"{"uuid":"7357a549-fa3e-4342-91b2-63e5e73ed39a","language":"de_de","op":false,"last_seen":"2021-03-01T12:00:00Z"}"#;

    #[test]
    fn operator_not_found_is_false() {
        assert!(!operator(RawResponse::new(404, "")).unwrap());
        assert!(operator(RawResponse::new(200, r#"{"op":true}"#)).unwrap());
        assert!(matches!(
            operator(RawResponse::new(200, "{}")),
            Err(RemoteError::InvalidResponse(_))
        ));
    }

    #[test]
    fn auth_statuses() {
        assert!(matches!(
            operator(RawResponse::new(401, "")),
            Err(RemoteError::Unauthenticated)
        ));
        assert!(matches!(
            operator(RawResponse::new(403, "")),
            Err(RemoteError::Unauthorized)
        ));
        assert!(matches!(
            operator(RawResponse::new(500, "boom")),
            Err(RemoteError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[test]
    fn player_envelope() {
        let body = format!(r#"{{"player":{}}}"#, RECORD);
        let record = player(RawResponse::new(200, body.clone())).unwrap();
        assert_eq!(record.language.as_deref(), Some("de_de"));

        assert_eq!(optional_player(RawResponse::new(404, "")).unwrap(), None);
        assert!(optional_player(RawResponse::new(200, body)).unwrap().is_some());
    }

    #[test]
    fn link_already_linked_is_not_an_error() {
        let body = r#"{"message":"The given data was invalid.","errors":{"uuid":["The uuid has already been taken."]}}"#;
        assert_eq!(
            link_token(RawResponse::new(422, body)).unwrap(),
            LinkOutcome::AlreadyLinked
        );
        assert_eq!(
            link_token(RawResponse::new(201, r#"{"token":"abc"}"#)).unwrap(),
            LinkOutcome::Token("abc".into())
        );
    }

    #[test]
    fn link_other_validation_stays_an_error() {
        let body = r#"{"errors":{"uuid":["The uuid field is required."]}}"#;
        match link_token(RawResponse::new(422, body)) {
            Err(RemoteError::Validation(errors)) => {
                assert!(errors.has("uuid", "The uuid field is required."))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn language_rejected_by_validation() {
        let body = r#"{"errors":{"lang":["The selected lang is invalid."]}}"#;
        assert!(!language_set(RawResponse::new(422, body)).unwrap());
        assert!(language_set(RawResponse::new(200, "")).unwrap());
        assert!(language_set(RawResponse::new(503, "")).is_err());
    }

    #[test]
    fn typed_bodies() {
        let result: IncrementResult =
            ok_json(RawResponse::new(200, r#"{"success":true}"#)).unwrap();
        assert!(result.success);

        let transaction: TransactionResult =
            ok_or_created_json(RawResponse::new(201, r#"{"status":"success","message":"ok"}"#))
                .unwrap();
        assert!(transaction.is_success());

        let languages: Vec<String> =
            ok_json(RawResponse::new(200, r#"["en_us","de_de"]"#)).unwrap();
        assert_eq!(languages, vec!["en_us", "de_de"]);
    }
}
