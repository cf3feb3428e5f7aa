use crate::encoding;
use crate::push::Upsert;
use crate::state;
use crate::types::push::SubscriptionRecord;
use crate::types::sync::{SyncAck, SyncForm};

use axum::Json;
use axum::extract::{Form, State};
use axum::http::header::{COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use time::OffsetDateTime;

use super::ErrorResponse;

type ApiError = (StatusCode, Json<ErrorResponse>);

const X_FORWARDED_FOR: &str = "x-forwarded-for";

fn bad_request(error: &'static str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn validate(form: &SyncForm) -> Result<(), ApiError> {
    if form.endpoint.trim().is_empty() {
        return Err(bad_request("missing endpoint"));
    }
    if form.key.trim().is_empty() {
        return Err(bad_request("missing key"));
    }
    if form.auth.trim().is_empty() {
        return Err(bad_request("missing auth"));
    }
    if encoding::decode_key(&form.key).is_err() {
        return Err(bad_request("key is not valid base64"));
    }
    if encoding::decode_key(&form.auth).is_err() {
        return Err(bad_request("auth is not valid base64"));
    }
    Ok(())
}

fn header_value(headers: &HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn owner_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE).iter() {
        if let Ok(raw) = header.to_str()
            && let Some(value) = cookie_from_header(raw, name)
            && !value.is_empty()
        {
            return Some(value.to_string());
        }
    }
    None
}

fn cookie_from_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let trimmed = part.trim();
        if let Some((cookie_name, cookie_value)) = trimmed.split_once('=')
            && cookie_name == name
        {
            return Some(cookie_value);
        }
    }
    None
}

pub(crate) async fn subscribe(
    State(state): State<state::AppState>,
    headers: HeaderMap,
    Form(form): Form<SyncForm>,
) -> Result<Json<SyncAck>, ApiError> {
    validate(&form)?;

    let record = SubscriptionRecord {
        endpoint: form.endpoint.trim().to_string(),
        key: form.key.trim().to_string(),
        auth: form.auth.trim().to_string(),
        user_agent: header_value(&headers, USER_AGENT),
        host: header_value(&headers, X_FORWARDED_FOR),
        owner: owner_from_headers(&headers, &state.config.owner_cookie),
        updated_at: OffsetDateTime::now_utc(),
    };
    let endpoint = record.endpoint.clone();

    match state.store.upsert(record) {
        Ok(Upsert::Created) => tracing::info!(%endpoint, "subscription added"),
        Ok(Upsert::Updated) => tracing::info!(%endpoint, "subscription refreshed"),
        Err(err) => {
            tracing::error!(%endpoint, error = %err, "failed to store subscription");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "failed to store subscription",
                }),
            ));
        }
    }

    Ok(Json(SyncAck {
        status: "subscribed".to_string(),
    }))
}

pub(crate) async fn unsubscribe(
    State(state): State<state::AppState>,
    Form(form): Form<SyncForm>,
) -> Result<Json<SyncAck>, ApiError> {
    validate(&form)?;
    let endpoint = form.endpoint.trim();

    match state.store.remove(endpoint) {
        Ok(Some(_)) => {
            tracing::info!(%endpoint, "subscription removed");
            Ok(Json(SyncAck {
                status: "unsubscribed".to_string(),
            }))
        }
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "subscription not found",
            }),
        )),
        Err(err) => {
            tracing::error!(%endpoint, error = %err, "failed to remove subscription");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "failed to remove subscription",
                }),
            ))
        }
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_from_header__should_find_named_cookie() {
        assert_eq!(
            cookie_from_header("theme=dark; syndicate=alice; x=1", "syndicate"),
            Some("alice")
        );
        assert_eq!(cookie_from_header("theme=dark", "syndicate"), None);
    }

    #[test]
    fn owner_from_headers__should_scan_every_cookie_header() {
        // Given
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("syndicate=bob"));

        // When
        let owner = owner_from_headers(&headers, "syndicate");

        // Then
        assert_eq!(owner.as_deref(), Some("bob"));
    }

    #[test]
    fn validate__should_report_first_missing_field() {
        let form = |endpoint: &str, key: &str, auth: &str| SyncForm {
            endpoint: endpoint.to_string(),
            key: key.to_string(),
            auth: auth.to_string(),
        };

        assert_eq!(
            validate(&form("", "a2V5", "YXV0aA==")).unwrap_err().1.0.error,
            "missing endpoint"
        );
        assert_eq!(
            validate(&form("https://push.example/1", " ", "YXV0aA=="))
                .unwrap_err()
                .1
                .0
                .error,
            "missing key"
        );
        assert_eq!(
            validate(&form("https://push.example/1", "a2V5", ""))
                .unwrap_err()
                .1
                .0
                .error,
            "missing auth"
        );
        assert_eq!(
            validate(&form("https://push.example/1", "%%%", "YXV0aA=="))
                .unwrap_err()
                .1
                .0
                .error,
            "key is not valid base64"
        );
        assert!(validate(&form("https://push.example/1", "a2V5", "YXV0aA==")).is_ok());
    }
}
