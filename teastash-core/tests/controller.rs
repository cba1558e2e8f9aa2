//! Integration tests for the sync controller.
//!
//! These drive [`SyncController`] against a scripted in-memory remote that
//! records every call, verifying the optimistic-update rules: local
//! mutation first, remote call after, no rollback on failure, and the
//! decrement-to-zero collapse into a delete.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use teastash_core::{
    CreateTea, DraftField, Error, RemoteStore, Result, SyncController, TeaRecord, UpdateTea,
};

/// One observed remote call.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Create(CreateTea),
    Update(UpdateTea),
    Delete(String),
}

#[derive(Default)]
struct MockState {
    calls: RefCell<Vec<Call>>,
    /// What every `list` call returns (the store's canonical view)
    list_response: RefCell<Vec<TeaRecord>>,
    fail_list: Cell<bool>,
    fail_create: Cell<bool>,
    fail_update: Cell<bool>,
    fail_delete: Cell<bool>,
}

/// Scripted remote store; clones share state so tests can inspect calls
/// after handing one clone to the controller.
#[derive(Clone, Default)]
struct MockRemote {
    state: Rc<MockState>,
}

impl MockRemote {
    fn calls(&self) -> Vec<Call> {
        self.state.calls.borrow().clone()
    }

    fn set_list_response(&self, records: Vec<TeaRecord>) {
        *self.state.list_response.borrow_mut() = records;
    }
}

fn synced(id: &str, name: &str, bags: u32) -> TeaRecord {
    TeaRecord {
        id: Some(id.to_string()),
        name: name.to_string(),
        bags,
        created_at: None,
        updated_at: None,
    }
}

impl RemoteStore for MockRemote {
    async fn list(&self) -> Result<Vec<TeaRecord>> {
        self.state.calls.borrow_mut().push(Call::List);
        if self.state.fail_list.get() {
            return Err(Error::Remote("list failed".to_string()));
        }
        Ok(self.state.list_response.borrow().clone())
    }

    async fn create(&self, input: &CreateTea) -> Result<TeaRecord> {
        self.state.calls.borrow_mut().push(Call::Create(input.clone()));
        if self.state.fail_create.get() {
            return Err(Error::Remote("create failed".to_string()));
        }
        Ok(synced("assigned-id", &input.name, input.bags))
    }

    async fn update(&self, input: &UpdateTea) -> Result<TeaRecord> {
        self.state.calls.borrow_mut().push(Call::Update(input.clone()));
        if self.state.fail_update.get() {
            return Err(Error::Remote("update failed".to_string()));
        }
        Ok(synced(&input.id, &input.name, input.bags))
    }

    async fn delete(&self, id: &str) -> Result<TeaRecord> {
        self.state.calls.borrow_mut().push(Call::Delete(id.to_string()));
        if self.state.fail_delete.get() {
            return Err(Error::Remote("delete failed".to_string()));
        }
        Ok(synced(id, "deleted", 0))
    }
}

/// Controller pre-loaded with the given canonical records via one refresh.
async fn controller_with(records: Vec<TeaRecord>) -> (SyncController<MockRemote>, MockRemote) {
    let remote = MockRemote::default();
    remote.set_list_response(records);
    let controller = SyncController::new(remote.clone());
    controller.refresh().await;
    remote.state.calls.borrow_mut().clear();
    (controller, remote)
}

fn fill_draft(controller: &SyncController<MockRemote>, name: &str, bags: &str) {
    controller.set_input(DraftField::Name, name);
    controller.set_input(DraftField::Bags, bags);
}

// ============================================
// refresh
// ============================================

#[tokio::test]
async fn refresh_replaces_local_view() {
    let (controller, remote) = controller_with(vec![]).await;
    remote.set_list_response(vec![synced("a", "Oolong", 3), synced("b", "Mint", 7)]);

    controller.refresh().await;

    let teas = controller.snapshot();
    assert_eq!(teas.len(), 2);
    assert_eq!(teas[0].id.as_deref(), Some("a"));
    assert_eq!(remote.calls(), vec![Call::List]);
}

#[tokio::test]
async fn refresh_is_idempotent() {
    let (controller, _remote) =
        controller_with(vec![synced("a", "Oolong", 3), synced("b", "Mint", 7)]).await;

    controller.refresh().await;
    let first = controller.snapshot();
    controller.refresh().await;
    let second = controller.snapshot();

    assert_eq!(first, second);
}

#[tokio::test]
async fn refresh_failure_keeps_local_view() {
    let (controller, remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;
    remote.state.fail_list.set(true);

    controller.refresh().await;

    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].name, "Oolong");
}

// ============================================
// add
// ============================================

#[tokio::test]
async fn add_with_empty_name_is_a_no_op() {
    let (controller, remote) = controller_with(vec![]).await;
    fill_draft(&controller, "", "3");

    controller.add().await;

    assert!(controller.is_empty());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn add_with_empty_bags_is_a_no_op() {
    let (controller, remote) = controller_with(vec![]).await;
    fill_draft(&controller, "Green", "");

    controller.add().await;

    assert!(controller.is_empty());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn add_with_non_numeric_bags_is_a_no_op() {
    let (controller, remote) = controller_with(vec![]).await;
    fill_draft(&controller, "Green", "plenty");

    controller.add().await;

    assert!(controller.is_empty());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn add_creates_then_refreshes() {
    let (controller, remote) = controller_with(vec![]).await;
    // The canonical post-create view the next refresh will return
    remote.set_list_response(vec![synced("abc123", "Oolong", 3)]);
    fill_draft(&controller, "Oolong", "3");

    controller.add().await;

    assert_eq!(
        remote.calls(),
        vec![
            Call::Create(CreateTea {
                name: "Oolong".to_string(),
                bags: 3
            }),
            Call::List,
        ]
    );

    // Reconciled: the optimistic record now carries the assigned id
    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].id.as_deref(), Some("abc123"));

    // Draft buffer was reset
    assert_eq!(controller.draft().name, "");
    assert_eq!(controller.draft().bags, "");
}

#[tokio::test]
async fn add_failure_keeps_optimistic_record_without_id() {
    let (controller, remote) = controller_with(vec![]).await;
    remote.state.fail_create.set(true);
    fill_draft(&controller, "Oolong", "3");

    controller.add().await;

    // No rollback, no reconciling refresh
    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].id, None);
    assert_eq!(teas[0].bags, 3);
    assert_eq!(
        remote.calls(),
        vec![Call::Create(CreateTea {
            name: "Oolong".to_string(),
            bags: 3
        })]
    );
}

// ============================================
// drink
// ============================================

#[tokio::test]
async fn drink_decrements_in_place_and_updates() {
    let (controller, remote) = controller_with(vec![synced("abc123", "Oolong", 5)]).await;

    controller.drink(0).await;

    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].id.as_deref(), Some("abc123"));
    assert_eq!(teas[0].bags, 4);
    assert_eq!(
        remote.calls(),
        vec![Call::Update(UpdateTea {
            id: "abc123".to_string(),
            name: "Oolong".to_string(),
            bags: 4,
        })]
    );
}

#[tokio::test]
async fn drink_last_bag_deletes_instead_of_updating() {
    let (controller, remote) = controller_with(vec![synced("abc123", "Oolong", 1)]).await;

    controller.drink(0).await;

    assert!(controller.is_empty());
    assert_eq!(remote.calls(), vec![Call::Delete("abc123".to_string())]);
}

#[tokio::test]
async fn drink_at_zero_bags_takes_the_delete_path() {
    let (controller, remote) = controller_with(vec![synced("abc123", "Dust", 0)]).await;

    controller.drink(0).await;

    assert!(controller.is_empty());
    assert_eq!(remote.calls(), vec![Call::Delete("abc123".to_string())]);
}

#[tokio::test]
async fn drink_out_of_range_is_a_no_op() {
    let (controller, remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;

    controller.drink(5).await;

    assert_eq!(controller.len(), 1);
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn drink_update_failure_keeps_optimistic_count() {
    let (controller, remote) = controller_with(vec![synced("abc123", "Oolong", 5)]).await;
    remote.state.fail_update.set(true);

    controller.drink(0).await;

    assert_eq!(controller.snapshot()[0].bags, 4);
}

#[tokio::test]
async fn drink_delete_failure_keeps_record_removed() {
    let (controller, remote) = controller_with(vec![synced("abc123", "Oolong", 1)]).await;
    remote.state.fail_delete.set(true);

    controller.drink(0).await;

    assert!(controller.is_empty());
}

#[tokio::test]
async fn drink_unsynced_record_skips_remote_call() {
    let (controller, remote) = controller_with(vec![]).await;
    remote.state.fail_create.set(true);
    fill_draft(&controller, "Fresh", "1");
    controller.add().await;
    remote.state.calls.borrow_mut().clear();

    // The optimistic record never got an id; drinking its last bag has no
    // remote-addressable target.
    controller.drink(0).await;

    assert!(controller.is_empty());
    assert!(remote.calls().is_empty());
}

// ============================================
// remove
// ============================================

#[tokio::test]
async fn remove_deletes_by_id() {
    let (controller, remote) =
        controller_with(vec![synced("a", "Oolong", 3), synced("b", "Mint", 7)]).await;

    controller.remove(1).await;

    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].id.as_deref(), Some("a"));
    assert_eq!(remote.calls(), vec![Call::Delete("b".to_string())]);
}

#[tokio::test]
async fn remove_out_of_range_is_a_no_op() {
    let (controller, remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;

    controller.remove(1).await;

    assert_eq!(controller.len(), 1);
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn remove_failure_keeps_record_removed() {
    let (controller, remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;
    remote.state.fail_delete.set(true);

    controller.remove(0).await;

    assert!(controller.is_empty());
}

// ============================================
// render triggers
// ============================================

#[tokio::test]
async fn mutations_bump_the_revision() {
    let (controller, remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;
    let r0 = controller.revision();

    controller.drink(0).await;
    let r1 = controller.revision();
    assert_ne!(r0, r1);

    remote.set_list_response(vec![]);
    controller.refresh().await;
    assert_ne!(r1, controller.revision());
}

#[tokio::test]
async fn no_op_dispatch_leaves_revision_alone() {
    let (controller, _remote) = controller_with(vec![synced("a", "Oolong", 3)]).await;
    let r0 = controller.revision();

    controller.drink(7).await;
    controller.remove(7).await;
    controller.add().await; // empty draft

    assert_eq!(r0, controller.revision());
}

// ============================================
// end-to-end scenario
// ============================================

#[tokio::test]
async fn full_lifecycle_of_one_tea() {
    let (controller, remote) = controller_with(vec![]).await;

    // Add: optimistic append, create, refresh picks up the id
    remote.set_list_response(vec![synced("abc123", "Oolong", 3)]);
    fill_draft(&controller, "Oolong", "3");
    controller.add().await;

    let teas = controller.snapshot();
    assert_eq!(teas.len(), 1);
    assert_eq!(teas[0].id.as_deref(), Some("abc123"));
    assert_eq!(teas[0].bags, 3);

    // Two drinks: in-place decrements with minimal update payloads
    controller.drink(0).await;
    assert_eq!(controller.snapshot()[0].bags, 2);
    controller.drink(0).await;
    assert_eq!(controller.snapshot()[0].bags, 1);

    // Third drink hits zero: the record collapses into a delete
    controller.drink(0).await;
    assert!(controller.is_empty());

    assert_eq!(
        remote.calls(),
        vec![
            Call::Create(CreateTea {
                name: "Oolong".to_string(),
                bags: 3
            }),
            Call::List,
            Call::Update(UpdateTea {
                id: "abc123".to_string(),
                name: "Oolong".to_string(),
                bags: 2,
            }),
            Call::Update(UpdateTea {
                id: "abc123".to_string(),
                name: "Oolong".to_string(),
                bags: 1,
            }),
            Call::Delete("abc123".to_string()),
        ]
    );
}
