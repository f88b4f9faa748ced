//! Change-list synchronization
//!
//! The incremental sync algorithm shared by every offline-first repository.
//! Each repository parameterizes [`change_list_sync`] with closures into its
//! own local store and the remote catalog; the function itself holds no state
//! and performs no internal parallelism.
//!
//! ## Flow
//!
//! ```text
//! versions ──→ change_list_fetcher(cursor) ──→ partition(is_delete)
//!                                                │
//!                                   model_deleter, then model_updater
//!                                                │
//!                                   update versions to last entry's version
//! ```
//!
//! A failed pass leaves the version cursor untouched; a crash between the
//! local mutations and the cursor write causes the same entries to be
//! re-fetched and re-applied on the next pass, which is safe because upsert
//! and delete-by-ids are idempotent.

use std::future::Future;

use crate::domain::{ChangeListVersions, NetworkChangeList};

/// A whole-record update applied to the stored [`ChangeListVersions`]
///
/// Applied by the [`Synchronizer`] implementation under its own write lock so
/// the record is read and written as a unit.
pub type VersionsUpdate = Box<dyn FnOnce(ChangeListVersions) -> ChangeListVersions + Send>;

/// Port for reading and updating the persisted version cursors
///
/// Implemented by the preferences store. Callers must not run two sync passes
/// for the same collection concurrently: interleaved cursor reads and writes
/// could miss or duplicate a version window. The sync engine serializes
/// passes behind a single-flight guard; this trait does not enforce it.
#[async_trait::async_trait]
pub trait Synchronizer: Send + Sync {
    /// Reads the current version record
    async fn change_list_versions(&self) -> anyhow::Result<ChangeListVersions>;

    /// Applies `update` to the current record and persists the result
    async fn update_change_list_versions(&self, update: VersionsUpdate) -> anyhow::Result<()>;
}

/// Runs one incremental sync pass for a single collection
///
/// * `version_reader` - extracts this collection's cursor from the record
/// * `change_list_fetcher` - remote call returning mutations past the cursor
/// * `version_updater` - produces the updated record from the latest version
/// * `model_deleter` - deletes local entities by id
/// * `model_updater` - fetches full payloads for the ids and upserts them
///
/// Returns `true` on success. An empty change list is a success with no
/// further action and no cursor change. Deletions are applied strictly before
/// updates so an id appearing in both halves of one batch ends up present.
/// Any error from a step is logged and mapped to `false`, leaving the cursor
/// at its prior value; the caller retries on its next scheduled pass.
pub async fn change_list_sync<VR, CF, CFut, VU, MD, MDFut, MU, MUFut>(
    synchronizer: &dyn Synchronizer,
    version_reader: VR,
    change_list_fetcher: CF,
    version_updater: VU,
    model_deleter: MD,
    model_updater: MU,
) -> bool
where
    VR: FnOnce(&ChangeListVersions) -> i32,
    CF: FnOnce(i32) -> CFut,
    CFut: Future<Output = anyhow::Result<Vec<NetworkChangeList>>>,
    VU: FnOnce(ChangeListVersions, i32) -> ChangeListVersions + Send + 'static,
    MD: FnOnce(Vec<String>) -> MDFut,
    MDFut: Future<Output = anyhow::Result<()>>,
    MU: FnOnce(Vec<String>) -> MUFut,
    MUFut: Future<Output = anyhow::Result<()>>,
{
    let result: anyhow::Result<()> = async {
        // Fetch the change list since the last sync (akin to a git fetch)
        let current_version = version_reader(&synchronizer.change_list_versions().await?);
        let change_list = change_list_fetcher(current_version).await?;

        // Nothing changed past the cursor: success, cursor stays put.
        let latest_version = match change_list.last() {
            Some(entry) => entry.change_list_version,
            None => return Ok(()),
        };

        let (deleted, updated): (Vec<&NetworkChangeList>, Vec<&NetworkChangeList>) =
            change_list.iter().partition(|entry| entry.is_delete);

        let deleted_ids: Vec<String> = deleted.iter().map(|entry| entry.id.clone()).collect();
        let updated_ids: Vec<String> = updated.iter().map(|entry| entry.id.clone()).collect();

        tracing::debug!(
            since = current_version,
            latest = latest_version,
            deleted = deleted_ids.len(),
            updated = updated_ids.len(),
            "Applying change list"
        );

        // Delete models removed server-side, then pull down and save the
        // changed ones (akin to a git pull). Order matters: an id that is
        // deleted and re-created within one batch must survive.
        model_deleter(deleted_ids).await?;
        model_updater(updated_ids).await?;

        // Advance the cursor (akin to updating local git HEAD)
        synchronizer
            .update_change_list_versions(Box::new(move |versions| {
                version_updater(versions, latest_version)
            }))
            .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "Sync pass failed; cursor unchanged");
            false
        }
    }
}
