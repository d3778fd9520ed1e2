#![allow(dead_code)]

use crs_manage::{ClientConfig, ManagementClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

pub fn client_for(base_url: &str) -> ManagementClient {
    ManagementClient::new(ClientConfig::new(API_KEY).with_hostname(base_url))
        .expect("client should build")
}

/// Runs `f` with a client pointed at `server` on the blocking pool. The
/// blocking reqwest client must be created, used and dropped off the
/// async runtime threads.
pub async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    F: FnOnce(ManagementClient) -> T + Send + 'static,
    T: Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || f(client_for(&uri)))
        .await
        .expect("blocking task panicked")
}

pub fn collection_json(uuid: &str, name: &str) -> Value {
    json!({
        "uuid": uuid,
        "name": name,
        "resource_uri": format!("/api/v0/collection/{}/", uuid),
    })
}

pub fn item_json(uuid: &str, collection: &str, name: &str, custom: &str) -> Value {
    json!({
        "uuid": uuid,
        "name": name,
        "url": "http://example.com",
        "custom": custom,
        "collection": format!("/api/v0/collection/{}/", collection),
        "resource_uri": format!("/api/v0/item/{}/", uuid),
    })
}

pub fn image_json(uuid: &str, item: &str) -> Value {
    json!({
        "uuid": uuid,
        "name": "ref.jpg",
        "item": format!("/api/v0/item/{}/", item),
        "file": format!("https://cdn.example.com/{}.jpg", uuid),
        "thumb_120": format!("https://cdn.example.com/{}_120.jpg", uuid),
        "resource_uri": format!("/api/v0/image/{}/", uuid),
    })
}

pub fn token_json(token: &str, collection: &str) -> Value {
    json!({
        "token": token,
        "collection": format!("/api/v0/collection/{}/", collection),
        "resource_uri": format!("/api/v0/token/{}/", token),
    })
}

pub fn list_json(objects: Vec<Value>) -> Value {
    json!({
        "meta": { "limit": 5, "offset": 0, "total_count": objects.len() },
        "objects": objects,
    })
}
