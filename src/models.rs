// Records returned by the management API and the request parameters
// accepted by each operation. Records mirror the service's JSON; request
// structs hold bare identifiers and are turned into wire bodies by `api`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The four resource kinds managed by the API. The string form is the
/// path segment the service uses for the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Collection,
    Item,
    Image,
    Token,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Collection => "collection",
            ResourceKind::Item => "item",
            ResourceKind::Image => "image",
            ResourceKind::Token => "token",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the trailing identifier of a resource URI such as
/// `/api/v0/collection/<uuid>/`. A bare identifier is returned unchanged.
pub fn id_from_uri(uri: &str) -> &str {
    uri.trim_end_matches('/').rsplit('/').next().unwrap_or(uri)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Collection {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub resource_uri: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub custom: Option<String>,
    /// Resource URI of the owning collection.
    pub collection: String,
    #[serde(default)]
    pub resource_uri: String,
}

impl Item {
    pub fn collection_uuid(&self) -> &str {
        id_from_uri(&self.collection)
    }
}

/// A reference image attached to an item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Image {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    /// Resource URI of the owning item.
    pub item: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub thumb_120: Option<String>,
    #[serde(default)]
    pub resource_uri: String,
}

impl Image {
    pub fn item_uuid(&self) -> &str {
        id_from_uri(&self.item)
    }
}

/// A collection-scoped access token. The token string is its identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub token: String,
    /// Resource URI of the collection the token grants access to.
    pub collection: String,
    #[serde(default)]
    pub resource_uri: String,
}

impl Token {
    pub fn collection_uuid(&self) -> &str {
        id_from_uri(&self.collection)
    }
}

/// Envelope of every list response. Only `objects` is used; `meta`
/// (total count and paging links) is ignored. A body without `objects`
/// is not a list response and fails to decode.
#[derive(Deserialize, Debug)]
pub(crate) struct ListEnvelope<T> {
    pub objects: Vec<T>,
}

/// Paging window for list calls. Unset fields are left to the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListParams {
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewCollection {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// UUID of the collection the item belongs to.
    pub collection: String,
    pub name: String,
    pub url: Option<String>,
    pub custom: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

/// Upload request for a reference image read from `file`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    /// UUID of the item the image belongs to.
    pub item: String,
    pub file: PathBuf,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ImageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewToken {
    /// UUID of the collection the token is scoped to.
    pub collection: String,
}
