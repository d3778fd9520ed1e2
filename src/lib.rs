// Library root
// -----------
// Blocking client for the CRS image-recognition management API plus the
// walkthrough the `crs-manage` binary runs.
//
// Module responsibilities:
// - `api`: HTTP interactions with the management endpoints (list, get,
//   create, update, delete for collections, items, images and tokens).
// - `models`: records returned by the service and per-kind request
//   parameters.
// - `error`: the `ClientError` taxonomy shared by every operation.
// - `config`: command-line flags and the `ClientConfig` they resolve into.
// - `demo`: the fixed create/read/update/delete sequence and its output.
pub mod api;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;

pub use api::ManagementClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
