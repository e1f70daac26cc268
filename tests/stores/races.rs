//! Overlapping calls: only the latest issued call for a slice or item may
//! reconcile, whatever order responses arrive in.

use serde_json::json;

use crate::support::{envelope, harness, seed_services, service, three_services};

#[tokio::test]
async fn older_fetch_settling_last_is_discarded() {
    let h = harness();
    let older_gate = h.backend.gate();
    let newer_gate = h.backend.gate();

    let older = h.stores.services.fetch_services("v1");
    let newer = h.stores.services.fetch_services("v1");

    let fresh = vec![service("n", "New tour", 50.0)];
    newer_gate.respond(200, envelope("services", &fresh));
    newer.await;

    older_gate.respond(200, envelope("services", &three_services()));
    older.await;

    assert_eq!(h.stores.services.services(), fresh);
    assert!(!h.stores.services.loading());
}

#[tokio::test]
async fn older_fetch_settling_first_is_replaced() {
    let h = harness();
    let older_gate = h.backend.gate();
    let newer_gate = h.backend.gate();

    let older = h.stores.services.fetch_services("v1");
    let newer = h.stores.services.fetch_services("v1");

    older_gate.respond(200, envelope("services", &three_services()));
    older.await;
    // superseded before it settled
    assert!(h.stores.services.services().is_empty());

    let fresh = vec![service("n", "New tour", 50.0)];
    newer_gate.respond(200, envelope("services", &fresh));
    newer.await;
    assert_eq!(h.stores.services.services(), fresh);
}

#[tokio::test]
async fn last_issued_update_of_an_item_wins() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let first_gate = h.backend.gate();
    let second_gate = h.backend.gate();
    let first = h.stores.services.update_service(&service("b", "Boat trip", 11.0));
    let second = h.stores.services.update_service(&service("b", "Boat trip", 12.0));

    second_gate.respond(200, json!({ "service": service("b", "Boat trip", 12.0) }));
    assert!(second.await);
    first_gate.respond(200, json!({ "service": service("b", "Boat trip", 11.0) }));
    // the call itself succeeded, its result is just out of date
    assert!(first.await);

    assert_eq!(h.stores.services.services()[1].price, 12.0);
}

#[tokio::test]
async fn updates_of_different_items_both_apply() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let a_gate = h.backend.gate();
    let c_gate = h.backend.gate();
    let a = h.stores.services.update_service(&service("a", "Walking tour", 7.0));
    let c = h.stores.services.update_service(&service("c", "Food tasting", 17.0));

    c_gate.respond_empty(204);
    a_gate.respond_empty(204);
    assert!(c.await);
    assert!(a.await);

    let prices: Vec<f64> = h.stores.services.services().iter().map(|s| s.price).collect();
    assert_eq!(prices, vec![7.0, 10.0, 17.0]);
}

#[tokio::test]
async fn stale_failure_still_notifies_but_never_touches_cache() {
    let h = harness();
    let older_gate = h.backend.gate();
    let newer_gate = h.backend.gate();

    let older = h.stores.rooms.fetch_rooms("h1");
    let newer = h.stores.rooms.fetch_rooms("h1");

    newer_gate.respond(200, json!({ "rooms": [crate::support::room("r1", "single", 60.0)] }));
    newer.await;
    older_gate.respond(500, json!({ "message": "Database timeout" }));
    older.await;

    assert_eq!(h.stores.rooms.rooms().len(), 1);
    assert_eq!(h.notices.last().unwrap().message, "Database timeout");
}

#[tokio::test]
async fn delete_applies_despite_a_later_update_of_the_same_item() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let delete_gate = h.backend.gate();
    let update_gate = h.backend.gate();
    let deleting = h.stores.services.delete_service("b");
    let updating = h.stores.services.update_service(&service("b", "Boat trip", 12.0));

    delete_gate.respond_empty(204);
    assert!(deleting.await);
    update_gate.respond(404, json!({ "message": "Service not found" }));
    assert!(!updating.await);

    let ids: Vec<String> = h.stores.services.services().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn update_settling_after_delete_does_not_resurrect_the_item() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let update_gate = h.backend.gate();
    let delete_gate = h.backend.gate();
    let updating = h.stores.services.update_service(&service("b", "Boat trip", 12.0));
    let deleting = h.stores.services.delete_service("b");

    delete_gate.respond_empty(204);
    assert!(deleting.await);
    update_gate.respond_empty(204);
    assert!(updating.await);

    let ids: Vec<String> = h.stores.services.services().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "c"]);
}
