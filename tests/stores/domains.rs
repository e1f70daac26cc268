//! Per-domain operations: paths, envelopes and notices.

use marketplace_sync::draft::SectionPayload;
use marketplace_sync::{Method, TransferRate};
use serde_json::json;

use crate::support::harness;

fn rate(id: &str, from: &str, to: &str, rate: f64) -> TransferRate {
    TransferRate {
        id: id.into(),
        from_currency: from.into(),
        to_currency: to.into(),
        rate,
        fee: 1.0,
    }
}

#[tokio::test]
async fn lodging_lists_public_and_vendor_listings() {
    let h = harness();
    let listing = json!({
        "id": "l1",
        "title": "Cabin",
        "location": "Tromso",
        "price_per_night": 120.0,
        "vendor_id": "v7"
    });
    h.backend
        .reply(200, json!({ "listings": [listing.clone()] }))
        .reply(200, json!({ "listings": [] }));

    h.stores.lodging.fetch_listings().await;
    assert_eq!(h.stores.lodging.listings()[0].vendor_id.as_deref(), Some("v7"));

    h.stores.lodging.fetch_vendor_listings("v7").await;
    assert!(h.stores.lodging.listings().is_empty());

    let paths: Vec<_> = h.backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/listings", "/vendors/v7/listings"]);
}

#[tokio::test]
async fn transfer_rates_lookup_by_pair() {
    let h = harness();
    h.backend.reply(
        200,
        json!({ "rates": [rate("r1", "USD", "EUR", 0.9), rate("r2", "GBP", "EUR", 1.15)] }),
    );

    h.stores.transfer.fetch_rates().await;

    let gbp = h.stores.transfer.rate_for("GBP", "EUR").unwrap();
    assert_eq!(gbp.id, "r2");
    assert_eq!(gbp.quote(100.0), 114.0);
    assert!(h.stores.transfer.rate_for("EUR", "GBP").is_none());
}

#[tokio::test]
async fn transfer_create_and_delete() {
    let h = harness();
    h.backend
        .reply(201, json!({ "rate": rate("r3", "USD", "JPY", 150.0) }))
        .reply_empty(204);

    assert!(h.stores.transfer.create_rate(&rate("", "USD", "JPY", 150.0)).await);
    assert_eq!(h.stores.transfer.rates().len(), 1);
    assert_eq!(h.notices.last().unwrap().message, "Rate added successfully");

    assert!(h.stores.transfer.delete_rate("r3").await);
    assert!(h.stores.transfer.rates().is_empty());
    assert_eq!(h.backend.last_request().unwrap().path, "/transfer-rates/r3");
}

#[tokio::test]
async fn medical_packages_round_trip() {
    let h = harness();
    h.backend
        .reply(200, json!({ "packages": [{
            "id": "m1",
            "name": "Checkup",
            "hospital": "Central",
            "treatment": "Diagnostics",
            "price": 300.0
        }] }))
        .reply(200, json!({ "package": {
            "id": "m1",
            "name": "Full checkup",
            "hospital": "Central",
            "treatment": "Diagnostics",
            "price": 350.0
        } }));

    h.stores.medical.fetch_packages().await;
    let mut package = h.stores.medical.packages()[0].clone();
    package.name = "Full checkup".into();
    package.price = 350.0;

    assert!(h.stores.medical.update_package(&package).await);
    assert_eq!(h.stores.medical.packages(), vec![package]);
    assert_eq!(h.backend.last_request().unwrap().path, "/medical-packages/m1");
}

#[tokio::test]
async fn rooms_are_scoped_to_hotel() {
    let h = harness();
    h.backend.reply(200, json!({ "room": {
        "id": "r1",
        "hotel_id": "h1",
        "room_type": "suite",
        "price": 250.0
    } }));

    h.stores.rooms.fetch_room("r1").await;

    let room = h.stores.rooms.room().unwrap();
    assert_eq!(room.capacity, 2);
    assert!(room.available);
    assert_eq!(h.backend.last_request().unwrap().path, "/rooms/r1");
}

#[tokio::test]
async fn page_fetch_and_section_save() {
    let h = harness();
    h.backend
        .reply(200, json!({ "page": {
            "vendor_id": "v1",
            "header": { "title": "Sunrise Tours" }
        } }))
        .reply(200, json!({ "message": "saved" }));

    h.stores.pages.fetch_page("v1").await;
    let page = h.stores.pages.page().unwrap();
    assert_eq!(page.vendor_id, "v1");
    assert_eq!(page.section("header").unwrap()["title"], "Sunrise Tours");
    assert!(page.section("pricing").is_none());

    let payload = SectionPayload {
        section: "header",
        values: json!({ "title": "Sunset Tours" }),
    };
    assert!(h.stores.pages.save_page_section("v1", &payload).await);

    let request = h.backend.last_request().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/vendors/v1/page/header");
    assert_eq!(request.body, Some(json!({ "title": "Sunset Tours" })));
    assert_eq!(h.notices.last().unwrap().message, "Section saved successfully");
    // saving never rewrites the fetched page
    assert_eq!(h.stores.pages.page().unwrap(), page);
}
