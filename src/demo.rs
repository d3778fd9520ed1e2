// Walkthrough driver: lists, creates, updates and deletes every type of
// object in a fixed order. The token and item lifecycles run inside the
// collection's lifecycle and the image lifecycle inside the item's, so
// objects are always deleted children first.

use crate::api::ManagementClient;
use crate::error::ClientResult;
use crate::models::{
    CollectionUpdate, ItemUpdate, ListParams, NewCollection, NewImage, NewItem, NewToken,
};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub const COLLECTION_NAME: &str = "My API collection";
pub const EDITED_COLLECTION_NAME: &str = "My edited API collection";
pub const ITEM_NAME: &str = "My API item";
pub const EDITED_ITEM_NAME: &str = "My edited API item";
pub const ITEM_URL: &str = "http://example.com";
pub const ITEM_CUSTOM: &str = "Lorem Ipsum";
pub const EDITED_ITEM_CUSTOM: &str = "New Lorem Ipsum";

/// Inputs of one walkthrough run.
#[derive(Debug, Clone)]
pub struct Walkthrough {
    /// Reference image uploaded to the demo item.
    pub filename: PathBuf,
    pub items_per_page: u32,
}

/// Identifiers the service assigned during a run. All of them have been
/// deleted again by the time the run returns.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughReport {
    pub collection_uuid: String,
    pub token: String,
    pub item_uuid: String,
    pub image_uuid: String,
}

/// Runs the full sequence, writing each step's outcome to `out`. The first
/// failing call aborts the run; nothing created so far is cleaned up.
pub fn run_management<W: Write>(
    api: &ManagementClient,
    opts: &Walkthrough,
    out: &mut W,
) -> Result<WalkthroughReport> {
    let per_page = opts.items_per_page;
    let page = ListParams::page(per_page, 0);

    // Collection
    let heading = format!("Retrieving first {} collections", per_page);
    let collections = step(out, &heading, || api.list_collections(page))?;
    for c in &collections {
        writeln!(out, "{}: {}", c.uuid, c.name)?;
    }

    let collection = step(out, "Creating collection", || {
        api.create_collection(&NewCollection {
            name: COLLECTION_NAME.into(),
        })
    })?;
    let collection_uuid = collection.uuid.clone();
    anyhow::ensure!(
        !collection_uuid.is_empty(),
        "service returned a collection without uuid"
    );
    print_record(out, &collection)?;

    let collection = step(out, "Retrieving collection", || {
        api.get_collection(&collection_uuid)
    })?;
    print_record(out, &collection)?;

    step(out, "Updating collection", || {
        api.update_collection(
            &collection_uuid,
            &CollectionUpdate {
                name: Some(EDITED_COLLECTION_NAME.into()),
            },
        )
    })?;
    writeln!(out, "Updated: true, name: '{}'", EDITED_COLLECTION_NAME)?;

    let collection = step(out, "Retrieving collection", || {
        api.get_collection(&collection_uuid)
    })?;
    print_record(out, &collection)?;

    // Token
    let heading = format!("Retrieving first {} tokens", per_page);
    let tokens = step(out, &heading, || api.list_tokens(Some(&collection_uuid), page))?;
    for t in &tokens {
        writeln!(out, "Collection: {} Token: {}", t.collection, t.token)?;
    }

    let token = step(out, "Creating token", || {
        api.create_token(&NewToken {
            collection: collection_uuid.clone(),
        })
    })?;
    print_record(out, &token)?;

    step(out, "Deleting token", || api.delete_token(&token.token))?;
    writeln!(out, "Deleted: true")?;

    // Item
    let heading = format!("Retrieving first {} items", per_page);
    list_items(api, out, &heading, &collection_uuid, page)?;

    let item = step(out, "Creating item", || {
        api.create_item(&NewItem {
            collection: collection_uuid.clone(),
            name: ITEM_NAME.into(),
            url: Some(ITEM_URL.into()),
            custom: Some(ITEM_CUSTOM.into()),
        })
    })?;
    let item_uuid = item.uuid.clone();
    print_record(out, &item)?;

    list_items(api, out, &heading, &collection_uuid, page)?;

    let item = step(out, "Retrieving item", || api.get_item(&item_uuid))?;
    print_record(out, &item)?;

    step(out, "Updating item", || {
        api.update_item(
            &item_uuid,
            &ItemUpdate {
                name: Some(EDITED_ITEM_NAME.into()),
                custom: Some(EDITED_ITEM_CUSTOM.into()),
                ..Default::default()
            },
        )
    })?;
    writeln!(out, "Updated: true, name: '{}'", EDITED_ITEM_NAME)?;

    let item = step(out, "Retrieving item", || api.get_item(&item_uuid))?;
    print_record(out, &item)?;

    // Reference image
    let heading = format!("Retrieving first {} images", per_page);
    let images = step(out, &heading, || api.list_images(Some(&item_uuid), page))?;
    for i in &images {
        writeln!(out, "{}: {}", i.uuid, i.name)?;
    }

    let image = step(out, "Uploading image", || {
        api.create_image(&NewImage {
            item: item_uuid.clone(),
            file: opts.filename.clone(),
        })
    })?;
    let image_uuid = image.uuid.clone();
    print_record(out, &image)?;

    let image = step(out, "Retrieving image", || api.get_image(&image_uuid))?;
    writeln!(out, "uuid: {}", image.uuid)?;
    print_record(out, &image)?;

    // Teardown, children first.
    step(out, "Deleting image", || api.delete_image(&image_uuid))?;
    writeln!(out, "Deleted: true")?;

    step(out, "Deleting item", || api.delete_item(&item_uuid))?;
    writeln!(out, "Deleted: true")?;

    step(out, "Deleting collection", || {
        api.delete_collection(&collection_uuid)
    })?;
    writeln!(out, "Deleted: true")?;

    Ok(WalkthroughReport {
        collection_uuid,
        token: token.token,
        item_uuid,
        image_uuid,
    })
}

fn list_items<W: Write>(
    api: &ManagementClient,
    out: &mut W,
    heading: &str,
    collection_uuid: &str,
    page: ListParams,
) -> Result<()> {
    let items = step(out, heading, || api.list_items(Some(collection_uuid), page))?;
    for i in &items {
        writeln!(out, "{}: {}", i.uuid, i.name)?;
    }
    Ok(())
}

/// Prints the step heading, shows a spinner on stderr while `call` runs and
/// attaches the heading as context to a failure.
fn step<W, T, F>(out: &mut W, heading: &str, call: F) -> Result<T>
where
    W: Write,
    F: FnOnce() -> ClientResult<T>,
{
    writeln!(out, "\n- {}...", heading)?;
    out.flush()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(heading.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = call();
    spinner.finish_and_clear();
    result.with_context(|| format!("{} failed", heading))
}

fn print_record<W: Write, T: Serialize>(out: &mut W, record: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
    Ok(())
}
