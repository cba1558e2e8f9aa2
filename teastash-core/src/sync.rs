//! Sync controller: optimistic local mutation plus best-effort remote
//! reconciliation.
//!
//! Every operation follows the same shape: mutate [`TeaList`] synchronously
//! first (so the next render already shows the user's intent), then issue
//! the corresponding remote call and await it. A failed remote call is
//! logged and swallowed - no rollback, no retry, no error to the caller.
//! The next full [`refresh`](SyncController::refresh) snaps the local view
//! back to whatever the store holds.
//!
//! The controller is cheaply cloneable (shared `Rc` state) so an event loop
//! can spawn each operation as an independent local task. Local mutations
//! always complete before the first `.await`, and `RefCell` borrows are
//! never held across a suspension point.

use std::cell::RefCell;
use std::rc::Rc;

use crate::remote::RemoteStore;
use crate::state::TeaList;
use crate::types::{CreateTea, DraftField, TeaDraft, TeaRecord, UpdateTea};

/// Drives the local collection and keeps the remote store in step.
pub struct SyncController<R> {
    teas: Rc<RefCell<TeaList>>,
    draft: Rc<RefCell<TeaDraft>>,
    remote: Rc<R>,
}

impl<R> Clone for SyncController<R> {
    fn clone(&self) -> Self {
        Self {
            teas: Rc::clone(&self.teas),
            draft: Rc::clone(&self.draft),
            remote: Rc::clone(&self.remote),
        }
    }
}

/// Remote tail of a `drink` call, decided while the local borrow is held.
enum DrinkTail {
    Delete(String),
    Update(UpdateTea),
    /// Record has no server id yet; nothing addressable remotely.
    Unsynced,
}

impl<R: RemoteStore> SyncController<R> {
    /// Create a controller over an empty collection.
    pub fn new(remote: R) -> Self {
        Self {
            teas: Rc::new(RefCell::new(TeaList::new())),
            draft: Rc::new(RefCell::new(TeaDraft::default())),
            remote: Rc::new(remote),
        }
    }

    /// Cloned snapshot of the current records, for rendering.
    pub fn snapshot(&self) -> Vec<TeaRecord> {
        self.teas.borrow().get().to_vec()
    }

    /// Number of records currently held locally.
    pub fn len(&self) -> usize {
        self.teas.borrow().len()
    }

    /// True when the local collection is empty.
    pub fn is_empty(&self) -> bool {
        self.teas.borrow().is_empty()
    }

    /// Collection revision; changes whenever a render-worthy mutation lands.
    pub fn revision(&self) -> u64 {
        self.teas.borrow().revision()
    }

    /// Current pending-input buffer.
    pub fn draft(&self) -> TeaDraft {
        self.draft.borrow().clone()
    }

    /// Write one field of the pending-input buffer.
    pub fn set_input(&self, field: DraftField, value: impl Into<String>) {
        self.draft.borrow_mut().set(field, value);
    }

    /// Fetch the authoritative record list and replace the local view.
    ///
    /// On failure the local view is left untouched.
    pub async fn refresh(&self) {
        match self.remote.list().await {
            Ok(records) => self.teas.borrow_mut().replace(records),
            Err(err) => tracing::warn!(error = %err, "fetch failed; keeping local view"),
        }
    }

    /// Add a tea from the draft buffer.
    ///
    /// Silent no-op unless both draft fields are present and the bag count
    /// parses. The record lands locally (without an `id`) before the create
    /// is issued; a successful create triggers a refresh to pick up the
    /// server-assigned `id` and canonical ordering.
    pub async fn add(&self) {
        let input = {
            let mut draft = self.draft.borrow_mut();
            if draft.name.is_empty() || draft.bags.is_empty() {
                return;
            }
            let Ok(bags) = draft.bags.parse::<u32>() else {
                tracing::debug!(bags = %draft.bags, "ignoring add with non-numeric bag count");
                return;
            };

            let input = CreateTea {
                name: draft.name.clone(),
                bags,
            };
            self.teas
                .borrow_mut()
                .append(TeaRecord::local(input.name.clone(), bags));
            draft.reset();
            input
        };

        match self.remote.create(&input).await {
            Ok(_) => self.refresh().await,
            Err(err) => {
                tracing::warn!(error = %err, name = %input.name, "create failed; optimistic record kept without id");
            }
        }
    }

    /// Drink one bag of the tea at `index`.
    ///
    /// Decrementing to zero collapses into a delete: the record leaves the
    /// local list first, then the remote delete is issued. Otherwise the
    /// count is updated in place (same `id`, same position) and a remote
    /// update with exactly `{id, name, bags}` follows. Out-of-range
    /// indexes are a no-op.
    pub async fn drink(&self, index: usize) {
        let tail = {
            let mut teas = self.teas.borrow_mut();
            if index >= teas.len() {
                return;
            }
            let record = teas.get()[index].clone();
            let new_count = record.bags.saturating_sub(1);

            // Inclusive threshold: the last bag takes the delete path.
            if new_count == 0 {
                if teas.remove_at(index).is_err() {
                    return;
                }
                match record.id {
                    Some(id) => DrinkTail::Delete(id),
                    None => DrinkTail::Unsynced,
                }
            } else {
                let mut updated = record.clone();
                updated.bags = new_count;
                if teas.update_at(index, updated).is_err() {
                    return;
                }
                match record.id {
                    Some(id) => DrinkTail::Update(UpdateTea {
                        id,
                        name: record.name,
                        bags: new_count,
                    }),
                    None => DrinkTail::Unsynced,
                }
            }
        };

        match tail {
            DrinkTail::Delete(id) => {
                if let Err(err) = self.remote.delete(&id).await {
                    tracing::warn!(error = %err, id = %id, "delete failed; record already removed locally");
                }
            }
            DrinkTail::Update(input) => {
                if let Err(err) = self.remote.update(&input).await {
                    tracing::warn!(error = %err, id = %input.id, "update failed; keeping optimistic count");
                }
            }
            DrinkTail::Unsynced => {
                tracing::debug!("record has no id yet; skipping remote call");
            }
        }
    }

    /// Delete the tea at `index` outright. Out-of-range indexes are a no-op.
    pub async fn remove(&self, index: usize) {
        let id = {
            let mut teas = self.teas.borrow_mut();
            if index >= teas.len() {
                return;
            }
            match teas.remove_at(index) {
                Ok(removed) => removed.id,
                Err(_) => return,
            }
        };

        let Some(id) = id else {
            tracing::debug!("record has no id yet; skipping remote delete");
            return;
        };

        if let Err(err) = self.remote.delete(&id).await {
            tracing::warn!(error = %err, id = %id, "delete failed; record already removed locally");
        }
    }
}
