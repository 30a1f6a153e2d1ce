use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api::error::{ApiError, MessageBody};
use crate::clients::UserClient;
use crate::model::{User, UserCreate, UserId, UserPatch};

type ApiResult<T> = Result<T, ApiError>;

/// Message returned by `POST /reset`.
pub const RESET_MESSAGE: &str = "REST API state reset";

/// Reads the leading run of digits (`"3abc"` is 3). Without one, or for a negative
/// number, no user can match.
fn parse_id(raw: &str) -> ApiResult<UserId> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);
    digits.parse().map_err(|_| ApiError::NotFound)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// A body that is not JSON, or is empty, counts as an empty object.
fn body_or_default<T: DeserializeOwned + Default>(headers: &HeaderMap, body: &Bytes) -> ApiResult<T> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let Json(value) = Json::<T>::from_bytes(body)?;
    Ok(value)
}

#[tracing::instrument(name = "users.list_active", skip(client))]
pub async fn list_active(State(client): State<UserClient>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(client.list_active().await?))
}

#[tracing::instrument(name = "users.list_all", skip(client))]
pub async fn list_all(State(client): State<UserClient>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(client.list_all_users().await?))
}

#[tracing::instrument(name = "users.get_user", skip(client))]
pub async fn get_user(
    State(client): State<UserClient>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    Ok(Json(client.get_user(id).await?))
}

#[tracing::instrument(name = "users.create_user", skip(client, headers, body))]
pub async fn create_user(
    State(client): State<UserClient>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let params: UserCreate = body_or_default(&headers, &body)?;
    let user = client.create_user(params).await?;
    info!(user.id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[tracing::instrument(name = "users.replace_user", skip(client, headers, body))]
pub async fn replace_user(
    State(client): State<UserClient>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    let fields: UserPatch = body_or_default(&headers, &body)?;
    Ok(Json(client.replace_user(id, fields).await?))
}

#[tracing::instrument(name = "users.patch_user", skip(client, headers, body))]
pub async fn patch_user(
    State(client): State<UserClient>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    let fields: UserPatch = body_or_default(&headers, &body)?;
    Ok(Json(client.patch_user(id, fields).await?))
}

#[tracing::instrument(name = "users.delete_user", skip(client))]
pub async fn delete_user(
    State(client): State<UserClient>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    client.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "users.reset", skip(client))]
pub async fn reset(State(client): State<UserClient>) -> ApiResult<Json<MessageBody>> {
    client.reset().await?;
    info!("Store reset to seed users");
    Ok(Json(MessageBody::new(RESET_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    #[test]
    fn parse_id_reads_leading_digits() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
        assert_eq!(parse_id("3abc").unwrap(), 3);
        assert_eq!(parse_id("+4").unwrap(), 4);
        assert_eq!(parse_id("2.9").unwrap(), 2);
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id(""), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("99999999999"), Err(ApiError::NotFound)));
    }

    #[test]
    fn missing_or_empty_body_becomes_default() {
        let params: UserCreate = body_or_default(&HeaderMap::new(), &Bytes::new()).unwrap();
        assert_eq!(params, UserCreate::default());

        let params: UserCreate = body_or_default(&json_headers(), &Bytes::from_static(b" \n")).unwrap();
        assert_eq!(params, UserCreate::default());

        let mut text = HeaderMap::new();
        text.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let params: UserCreate = body_or_default(&text, &Bytes::from_static(b"name=Ewa")).unwrap();
        assert_eq!(params, UserCreate::default());
    }

    #[test]
    fn json_body_is_parsed_and_syntax_errors_rejected() {
        let params: UserCreate =
            body_or_default(&json_headers(), &Bytes::from_static(br#"{"age":"30"}"#)).unwrap();
        assert_eq!(params.age, Some(json!("30")));

        let err = body_or_default::<UserCreate>(&json_headers(), &Bytes::from_static(b"{\"name\": "))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadBody { status, .. } if status == StatusCode::BAD_REQUEST));
    }
}
