//! How successful responses land in the cache.

use marketplace_sync::{CollectionView, Method};
use serde_json::json;

use crate::support::{envelope, harness, room, seed_services, service, three_services};

#[tokio::test]
async fn fetch_replaces_collection_in_server_order() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let reordered = vec![service("c", "Food tasting", 15.0), service("a", "Walking tour", 5.0)];
    h.backend.reply(200, envelope("services", &reordered));
    h.stores.services.fetch_services("v1").await;

    assert_eq!(h.stores.services.services(), reordered);
    assert_eq!(h.backend.last_request().unwrap().path, "/vendors/v1/services");
}

#[tokio::test]
async fn update_replaces_in_place() {
    let h = harness();
    seed_services(&h, &three_services()).await;

    let mut edited = service("b", "Boat trip", 10.0);
    edited.price = 20.0;
    h.backend.reply(200, json!({ "service": edited }));

    assert!(h.stores.services.update_service(&edited).await);

    let services = h.stores.services.services();
    let mut expected = three_services();
    expected[1].price = 20.0;
    assert_eq!(services, expected);

    let request = h.backend.last_request().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/services/b");
    assert_eq!(request.body.unwrap()["price"], 20.0);
}

#[tokio::test]
async fn bodiless_update_keeps_submitted_values() {
    let h = harness();
    seed_services(&h, &three_services()).await;
    h.backend.reply_empty(204);

    let edited = service("c", "Street food tasting", 15.0);
    assert!(h.stores.services.update_service(&edited).await);
    assert_eq!(h.stores.services.services()[2], edited);
}

#[tokio::test]
async fn update_of_unknown_identity_leaves_collection() {
    let h = harness();
    seed_services(&h, &three_services()).await;
    h.backend.reply(200, json!({ "service": service("x", "Ghost", 1.0) }));

    assert!(h.stores.services.update_service(&service("x", "Ghost", 1.0)).await);
    assert_eq!(h.stores.services.services(), three_services());
}

#[tokio::test]
async fn delete_removes_one_and_keeps_order() {
    let h = harness();
    seed_services(&h, &three_services()).await;
    h.backend.reply(200, json!({ "message": "deleted" }));

    assert!(h.stores.services.delete_service("b").await);

    let ids: Vec<_> = h.stores.services.services().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let request = h.backend.last_request().unwrap();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "/services/b");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn tracked_create_appends_server_copy() {
    let h = harness();
    h.backend
        .reply(200, json!({ "rooms": [room("r1", "single", 60.0)] }))
        .reply(201, json!({ "room": room("r2", "double", 90.0) }));
    h.stores.rooms.fetch_rooms("h1").await;

    let draft = room("", "double", 90.0);
    assert!(h.stores.rooms.add_room("h1", &draft).await);

    let rooms = h.stores.rooms.rooms();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[1].id, "r2");

    let request = h.backend.last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/hotels/h1/rooms");
    assert_eq!(request.body.unwrap()["room_type"], "double");
}

#[tokio::test]
async fn untracked_create_leaves_collection() {
    let h = harness();
    h.backend.reply(201, json!({ "message": "created" }));

    let package = marketplace_sync::MedicalPackage {
        id: String::new(),
        name: "Dental care".into(),
        hospital: "City Clinic".into(),
        treatment: "Implants".into(),
        price: 1200.0,
        duration_days: 5,
        inclusions: vec!["Hotel".into()],
        description: String::new(),
    };
    assert!(h.stores.medical.create_package(&package).await);
    assert!(h.stores.medical.packages().is_empty());
    assert_eq!(h.stores.medical.view(), CollectionView::NotFound);
}

#[tokio::test]
async fn read_one_fills_selected_slice_only() {
    let h = harness();
    h.backend.reply(
        200,
        json!({ "listing": {
            "_id": "l1",
            "title": "Sea view flat",
            "location": "Lisbon",
            "price_per_night": 80.0
        } }),
    );

    h.stores.lodging.fetch_listing("l1").await;

    let listing = h.stores.lodging.listing().unwrap();
    assert_eq!(listing.id, "l1");
    assert_eq!(listing.max_guests, 0);
    assert!(h.stores.lodging.listings().is_empty());
    assert_eq!(h.backend.last_request().unwrap().path, "/listings/l1");
}

#[tokio::test]
async fn not_modified_keeps_cache() {
    let h = harness();
    seed_services(&h, &three_services()).await;
    let revision = h.stores.services.store().status().revision;

    h.backend.reply_empty(304);
    h.stores.services.fetch_services("v1").await;

    assert_eq!(h.stores.services.services(), three_services());
    assert_eq!(h.stores.services.store().status().revision, revision);
    assert!(h.notices.notices().is_empty());
}

#[tokio::test]
async fn mutations_report_success_notices() {
    let h = harness();
    seed_services(&h, &three_services()).await;
    h.backend.reply_empty(204);

    assert!(h.stores.services.delete_service("a").await);
    let notice = h.notices.last().unwrap();
    assert!(!notice.is_error());
    assert_eq!(notice.message, "Service deleted successfully");
}
