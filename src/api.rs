// API client module: a blocking HTTP client for the CRS management API.
// Every call is a single round trip that carries the API key as a query
// parameter; there is no caching, batching or retrying.

use crate::config::{normalize_hostname, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Collection, CollectionUpdate, Image, ImageUpdate, Item, ItemUpdate, ListEnvelope, ListParams,
    NewCollection, NewImage, NewItem, NewToken, ResourceKind, Token,
};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Version segment of every management endpoint.
pub const API_VERSION: &str = "v0";

/// Resource URI of `id` as the service spells it in parent references.
pub fn resource_uri(kind: ResourceKind, id: &str) -> String {
    format!("/api/{}/{}/{}/", API_VERSION, kind, id)
}

/// Blocking client for the management API. Holds the HTTP client, the
/// resolved base URL and the static API key.
#[derive(Clone)]
pub struct ManagementClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct NewItemBody<'a> {
    collection: String,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom: Option<&'a str>,
}

#[derive(Serialize)]
struct NewTokenBody {
    collection: String,
}

impl ManagementClient {
    /// Builds a client from `config`, validating the hostname.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = normalize_hostname(&config.hostname)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(ManagementClient {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Base URL all requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Collections ──────────────────────────────────────────────────

    /// Lists collections in server order.
    pub fn list_collections(&self, page: ListParams) -> ClientResult<Vec<Collection>> {
        self.list(ResourceKind::Collection, None, page)
    }

    /// Fetches one collection by uuid.
    pub fn get_collection(&self, uuid: &str) -> ClientResult<Collection> {
        self.get(ResourceKind::Collection, uuid)
    }

    /// Creates a collection and returns it with its assigned uuid.
    pub fn create_collection(&self, fields: &NewCollection) -> ClientResult<Collection> {
        self.create(ResourceKind::Collection, fields)
    }

    /// Renames a collection.
    pub fn update_collection(&self, uuid: &str, fields: &CollectionUpdate) -> ClientResult<()> {
        self.update(ResourceKind::Collection, uuid, fields)
    }

    /// Deletes a collection. Its items and tokens are not removed.
    pub fn delete_collection(&self, uuid: &str) -> ClientResult<()> {
        self.delete(ResourceKind::Collection, uuid)
    }

    // ── Items ────────────────────────────────────────────────────────

    /// Lists items, optionally only those of one collection.
    pub fn list_items(&self, collection: Option<&str>, page: ListParams) -> ClientResult<Vec<Item>> {
        let filter = collection.map(|uuid| ("collection__uuid", uuid));
        self.list(ResourceKind::Item, filter, page)
    }

    /// Fetches one item by uuid.
    pub fn get_item(&self, uuid: &str) -> ClientResult<Item> {
        self.get(ResourceKind::Item, uuid)
    }

    /// Creates an item inside `fields.collection`.
    pub fn create_item(&self, fields: &NewItem) -> ClientResult<Item> {
        let body = NewItemBody {
            collection: resource_uri(ResourceKind::Collection, &fields.collection),
            name: &fields.name,
            url: fields.url.as_deref(),
            custom: fields.custom.as_deref(),
        };
        self.create(ResourceKind::Item, &body)
    }

    /// Sends the set fields of `fields` as a partial update.
    pub fn update_item(&self, uuid: &str, fields: &ItemUpdate) -> ClientResult<()> {
        self.update(ResourceKind::Item, uuid, fields)
    }

    /// Deletes an item. Delete its images first.
    pub fn delete_item(&self, uuid: &str) -> ClientResult<()> {
        self.delete(ResourceKind::Item, uuid)
    }

    // ── Reference images ─────────────────────────────────────────────

    /// Lists reference images, optionally only those of one item.
    pub fn list_images(&self, item: Option<&str>, page: ListParams) -> ClientResult<Vec<Image>> {
        let filter = item.map(|uuid| ("item__uuid", uuid));
        self.list(ResourceKind::Image, filter, page)
    }

    /// Fetches one reference image by uuid.
    pub fn get_image(&self, uuid: &str) -> ClientResult<Image> {
        self.get(ResourceKind::Image, uuid)
    }

    /// Uploads a reference image as multipart/form-data. The file is read
    /// before anything is sent, so a bad path never reaches the service.
    pub fn create_image(&self, fields: &NewImage) -> ClientResult<Image> {
        let bytes = std::fs::read(&fields.file).map_err(|source| ClientError::ImageFile {
            path: fields.file.clone(),
            source,
        })?;
        let file_name = fields
            .file
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("image.jpg")
            .to_string();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(&fields.file))?;
        let form = multipart::Form::new()
            .text("item", resource_uri(ResourceKind::Item, &fields.item))
            .part("file", part);

        let req = self
            .request(Method::POST, ResourceKind::Image, None)
            .multipart(form);
        let res = self.send(req, ResourceKind::Image, None)?;
        decode(res)
    }

    /// Renames a reference image.
    pub fn update_image(&self, uuid: &str, fields: &ImageUpdate) -> ClientResult<()> {
        self.update(ResourceKind::Image, uuid, fields)
    }

    /// Deletes a reference image.
    pub fn delete_image(&self, uuid: &str) -> ClientResult<()> {
        self.delete(ResourceKind::Image, uuid)
    }

    // ── Tokens ───────────────────────────────────────────────────────

    /// Lists tokens, optionally only those of one collection.
    pub fn list_tokens(&self, collection: Option<&str>, page: ListParams) -> ClientResult<Vec<Token>> {
        let filter = collection.map(|uuid| ("collection__uuid", uuid));
        self.list(ResourceKind::Token, filter, page)
    }

    /// Fetches one token by its token string.
    pub fn get_token(&self, token: &str) -> ClientResult<Token> {
        self.get(ResourceKind::Token, token)
    }

    /// Creates a token scoped to `fields.collection`.
    pub fn create_token(&self, fields: &NewToken) -> ClientResult<Token> {
        let body = NewTokenBody {
            collection: resource_uri(ResourceKind::Collection, &fields.collection),
        };
        self.create(ResourceKind::Token, &body)
    }

    /// Revokes a token.
    pub fn delete_token(&self, token: &str) -> ClientResult<()> {
        self.delete(ResourceKind::Token, token)
    }

    // ── Shared plumbing ──────────────────────────────────────────────

    fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        filter: Option<(&'static str, &str)>,
        page: ListParams,
    ) -> ClientResult<Vec<T>> {
        let mut req = self.request(Method::GET, kind, None).query(&page.to_query());
        if let Some(filter) = filter {
            req = req.query(&[filter]);
        }
        let res = self.send(req, kind, None)?;
        let mut objects = decode::<ListEnvelope<T>>(res)?.objects;
        // The service may ignore `limit`; never hand back more than asked for.
        if let Some(limit) = page.limit {
            objects.truncate(limit as usize);
        }
        Ok(objects)
    }

    fn get<T: DeserializeOwned>(&self, kind: ResourceKind, id: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, kind, Some(id));
        let res = self.send(req, kind, Some(id))?;
        decode(res)
    }

    fn create<T: DeserializeOwned, B: Serialize>(&self, kind: ResourceKind, body: &B) -> ClientResult<T> {
        let req = self.request(Method::POST, kind, None).json(body);
        let res = self.send(req, kind, None)?;
        decode(res)
    }

    fn update<B: Serialize>(&self, kind: ResourceKind, id: &str, body: &B) -> ClientResult<()> {
        let req = self.request(Method::PUT, kind, Some(id)).json(body);
        self.send(req, kind, Some(id))?;
        Ok(())
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, kind, Some(id));
        self.send(req, kind, Some(id))?;
        Ok(())
    }

    /// Builds a request for the kind's collection endpoint, or for one
    /// resource when `id` is given, with the API key attached.
    fn request(&self, method: Method, kind: ResourceKind, id: Option<&str>) -> RequestBuilder {
        let path = match id {
            Some(id) => resource_uri(kind, id),
            None => format!("/api/{}/{}/", API_VERSION, kind),
        };
        debug!(%method, %path, "management request");
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .query(&[("api_key", self.api_key.as_str())])
    }

    fn send(&self, req: RequestBuilder, kind: ResourceKind, id: Option<&str>) -> ClientResult<Response> {
        let res = req.send()?;
        let status = res.status();
        debug!(status = status.as_u16(), %kind, "management response");
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().unwrap_or_default();
        let message = error_message(status, &body);
        warn!(status = status.as_u16(), %kind, "request failed: {}", message);
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound {
                kind: kind.as_str(),
                id: id.unwrap_or_default().to_string(),
            },
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(message),
            _ => ClientError::Server { status, message },
        })
    }
}

/// Parses a success body. Reads text first so malformed JSON surfaces as
/// `Decode` rather than as a transport error.
fn decode<T: DeserializeOwned>(res: Response) -> ClientResult<T> {
    let text = res.text()?;
    Ok(serde_json::from_str(&text)?)
}

/// Best-effort message from an error body: `{"error": {"message": ..}}`,
/// `{"error": ".."}`, the raw text, or the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = value.get("error");
        let message = error
            .and_then(|e| e.get("message"))
            .or(error)
            .and_then(|m| m.as_str());
        if let Some(message) = message {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Content type for an uploaded image, from its extension.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
