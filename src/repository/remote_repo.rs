//! Remote Item Repository
//!
//! reqwest-backed implementation against the REST item store. Absorbs the
//! store's wire quirks here: responses arrive either as a bare array or
//! wrapped in a `{data: ...}` envelope, and error bodies may carry a
//! `{message: ...}` payload.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::{
    DomainError, DomainResult, Item, ItemDraft, ItemFilter, ItemPatch, ItemStatus, PhotoUpload,
};
use super::traits::{ItemMutation, ItemQuery, ResultSet};

/// HTTP client for the remote item store
pub struct RemoteItemRepository {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RemoteItemRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            auth_token: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request and read the body, folding transport failures
    /// into the domain taxonomy.
    async fn send(&self, builder: reqwest::RequestBuilder) -> DomainResult<(StatusCode, String)> {
        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait]
impl ItemQuery for RemoteItemRepository {
    async fn query(&self, filter: &ItemFilter) -> DomainResult<ResultSet> {
        let params = filter.query_params();
        debug!("GET /items {:?}", params);
        let (status, body) = self
            .send(self.request(reqwest::Method::GET, "/items").query(&params))
            .await?;
        if !status.is_success() {
            return Err(read_error(status, &body));
        }
        parse_items(&body)
    }

    async fn get(&self, id: u64) -> DomainResult<Option<Item>> {
        let (status, body) = self
            .send(self.request(reqwest::Method::GET, &format!("/items/{}", id)))
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(read_error(status, &body));
        }
        parse_item(&body).map(Some)
    }

    async fn my_items(&self, filter: &ItemFilter) -> DomainResult<ResultSet> {
        let params = filter.query_params();
        let (status, body) = self
            .send(self.request(reqwest::Method::GET, "/items/me/items").query(&params))
            .await?;
        if !status.is_success() {
            return Err(read_error(status, &body));
        }
        parse_items(&body)
    }
}

#[async_trait]
impl ItemMutation for RemoteItemRepository {
    async fn create(&self, draft: &ItemDraft) -> DomainResult<Item> {
        let form = draft_form(draft)?;
        let (status, body) = self
            .send(self.request(reqwest::Method::POST, "/items").multipart(form))
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        parse_item(&body)
    }

    async fn update(&self, id: u64, patch: &ItemPatch) -> DomainResult<Item> {
        let form = patch_form(patch)?;
        let (status, body) = self
            .send(
                self.request(reqwest::Method::PUT, &format!("/items/{}", id))
                    .multipart(form),
            )
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        parse_item(&body)
    }

    async fn set_status(&self, id: u64, new_status: ItemStatus) -> DomainResult<Item> {
        let (status, body) = self
            .send(
                self.request(reqwest::Method::PUT, &format!("/items/{}/status", id))
                    .json(&serde_json::json!({ "status": new_status })),
            )
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        parse_item(&body)
    }

    async fn delete(&self, id: u64) -> DomainResult<()> {
        let (status, body) = self
            .send(self.request(reqwest::Method::DELETE, &format!("/items/{}", id)))
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(())
    }
}

// ========================
// Wire Shapes
// ========================

/// List responses: bare array or `{data: [...]}` envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsPayload {
    Envelope {
        data: Vec<Item>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
    },
    Bare(Vec<Item>),
}

/// Single-item responses: bare object or `{data: {...}}` envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemPayload {
    Envelope { data: Item },
    Bare(Item),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn parse_items(body: &str) -> DomainResult<ResultSet> {
    let payload: ItemsPayload = serde_json::from_str(body)
        .map_err(|e| DomainError::FetchFailed(format!("malformed item list: {}", e)))?;
    Ok(match payload {
        ItemsPayload::Envelope { data, total, page } => ResultSet {
            items: data,
            total,
            page,
        },
        ItemsPayload::Bare(items) => ResultSet::from_items(items),
    })
}

fn parse_item(body: &str) -> DomainResult<Item> {
    let payload: ItemPayload = serde_json::from_str(body)
        .map_err(|e| DomainError::FetchFailed(format!("malformed item: {}", e)))?;
    Ok(match payload {
        ItemPayload::Envelope { data } => data,
        ItemPayload::Bare(item) => item,
    })
}

/// Best human-readable message for a failed response: the store's own
/// `{message}` when the body carries one, else the body or status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        })
}

/// Reads degrade to a single non-fatal failure kind
fn read_error(status: StatusCode, body: &str) -> DomainError {
    DomainError::FetchFailed(error_message(status, body))
}

/// Mutations keep the full taxonomy so the caller can explain a
/// permission mismatch or a vanished target distinctly.
fn status_error(status: StatusCode, body: &str) -> DomainError {
    let message = error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::Forbidden(message),
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        _ => DomainError::FetchFailed(message),
    }
}

/// Multipart body for a create: the store expects every structured field
/// plus an optional `photo` part in one request.
fn draft_form(draft: &ItemDraft) -> DomainResult<Form> {
    let occurred_at = draft.occurred_at.unwrap_or_else(Utc::now);
    let description = draft
        .description
        .clone()
        .unwrap_or_else(|| "No description provided".to_string());
    let mut form = Form::new()
        .text("title", draft.title.trim().to_string())
        .text("location", draft.location.trim().to_string())
        .text("date", occurred_at.to_rfc3339())
        .text("description", description)
        .text("contact_info", draft.contact_info.trim().to_string())
        .text("item_type", draft.kind.as_str().to_string());
    if let Some(photo) = &draft.photo {
        form = form.part("photo", photo_part(photo)?);
    }
    Ok(form)
}

/// Multipart body for an update: only the fields present in the patch
fn patch_form(patch: &ItemPatch) -> DomainResult<Form> {
    let mut form = Form::new();
    if let Some(title) = &patch.title {
        form = form.text("title", title.clone());
    }
    if let Some(description) = &patch.description {
        form = form.text("description", description.clone());
    }
    if let Some(location) = &patch.location {
        form = form.text("location", location.clone());
    }
    if let Some(contact_info) = &patch.contact_info {
        form = form.text("contact_info", contact_info.clone());
    }
    if let Some(occurred_at) = &patch.occurred_at {
        form = form.text("date", occurred_at.to_rfc3339());
    }
    if let Some(status) = &patch.status {
        form = form.text("status", status.as_str().to_string());
    }
    if let Some(photo) = &patch.photo {
        form = form.part("photo", photo_part(photo)?);
    }
    Ok(form)
}

fn photo_part(photo: &PhotoUpload) -> DomainResult<Part> {
    let mime = mime_guess::from_path(&photo.file_name).first_or_octet_stream();
    Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(mime.essence_str())
        .map_err(|e| DomainError::FetchFailed(format!("photo content type: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;
    use pretty_assertions::assert_eq;

    const ITEM_JSON: &str = r#"{
        "id": 3,
        "item_type": "lost",
        "title": "Student card",
        "description": "Blue lanyard",
        "location": "Cafeteria",
        "contact_info": "0812",
        "status": "dicari",
        "userId": 5,
        "createdAt": "2024-06-01T12:00:00Z"
    }"#;

    #[test]
    fn test_parse_bare_array() {
        let body = format!("[{}]", ITEM_JSON);
        let result = parse_items(&body).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].title, "Student card");
        assert_eq!(result.total, None);
    }

    #[test]
    fn test_parse_enveloped_list() {
        let body = format!(r#"{{"data": [{}], "total": 27, "page": 2}}"#, ITEM_JSON);
        let result = parse_items(&body).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.total, Some(27));
        assert_eq!(result.page, Some(2));
    }

    #[test]
    fn test_parse_enveloped_single_item() {
        let body = format!(r#"{{"data": {}}}"#, ITEM_JSON);
        let item = parse_item(&body).unwrap();
        assert_eq!(item.id, 3);
        assert_eq!(item.kind, ItemKind::Lost);
    }

    #[test]
    fn test_malformed_payload_is_fetch_failed() {
        assert!(matches!(
            parse_items("{\"data\": 12}"),
            Err(DomainError::FetchFailed(_))
        ));
    }

    #[test]
    fn test_mutation_status_mapping() {
        let err = status_error(StatusCode::FORBIDDEN, r#"{"message": "not yours"}"#);
        assert_eq!(err, DomainError::Forbidden("not yours".to_string()));

        let err = status_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err, DomainError::FetchFailed("boom".to_string()));
    }

    #[test]
    fn test_read_errors_collapse_to_fetch_failed() {
        let err = read_error(StatusCode::FORBIDDEN, r#"{"message": "nope"}"#);
        assert_eq!(err, DomainError::FetchFailed("nope".to_string()));

        let err = read_error(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, DomainError::FetchFailed(_)));
    }
}
