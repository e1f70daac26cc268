//! Draft editor integration tests.

mod page;

use marketplace_sync::VendorPage;
use serde_json::{json, Map, Value};

/// A fetched page carrying the given sections.
fn fetched_page(sections: Value) -> VendorPage {
    let sections: Map<String, Value> = match sections {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    VendorPage {
        vendor_id: "v1".into(),
        sections,
    }
}

fn sample_page() -> VendorPage {
    fetched_page(json!({
        "header": { "title": "Sunrise Tours", "subtitle": "Small groups, big views" },
        "about": { "body": "Family run since 1998." },
        "pricing": {
            "tiers": [
                { "name": "Half day", "price": 40.0, "features": ["Guide"] },
                {
                    "name": "Full day",
                    "price": 70.0,
                    "features": ["Guide", "Lunch"],
                    "highlighted": true
                }
            ]
        }
    }))
}
