//! Order preservation of update and delete over arbitrary collections.

use marketplace_sync::VendorService;
use proptest::prelude::*;
use serde_json::json;

use crate::support::{envelope, harness, service, Harness};

fn services(len: usize) -> Vec<VendorService> {
    (0..len)
        .map(|i| service(&format!("s{i}"), &format!("Service {i}"), i as f64))
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn seeded(rt: &tokio::runtime::Runtime, items: &[VendorService]) -> Harness {
    let h = harness();
    h.backend.reply(200, envelope("services", items));
    rt.block_on(h.stores.services.fetch_services("v1"));
    h
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn update_changes_only_the_target(
        len in 1usize..12,
        pick in any::<prop::sample::Index>(),
        price in 0.0f64..1000.0,
    ) {
        let rt = runtime();
        let before = services(len);
        let h = seeded(&rt, &before);

        let target = pick.index(len);
        let mut edited = before[target].clone();
        edited.price = price;
        h.backend.reply(200, json!({ "service": edited }));

        prop_assert!(rt.block_on(h.stores.services.update_service(&edited)));

        let after = h.stores.services.services();
        prop_assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(&after).enumerate() {
            if i == target {
                prop_assert_eq!(new, &edited);
            } else {
                prop_assert_eq!(new, old);
            }
        }
        prop_assert!(!h.stores.services.loading());
    }

    #[test]
    fn delete_removes_exactly_the_target(len in 1usize..12, pick in any::<prop::sample::Index>()) {
        let rt = runtime();
        let before = services(len);
        let h = seeded(&rt, &before);

        let target = pick.index(len);
        let id = before[target].id.clone();
        h.backend.reply_empty(204);

        prop_assert!(rt.block_on(h.stores.services.delete_service(&id)));

        let after = h.stores.services.services();
        let mut expected = before.clone();
        expected.remove(target);
        prop_assert_eq!(after.len(), len - 1);
        prop_assert!(after.iter().all(|s| s.id != id));
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn rejected_calls_never_change_the_cache(
        len in 0usize..8,
        status in prop::sample::select(vec![400u16, 401, 404, 409, 500, 503]),
    ) {
        let rt = runtime();
        let before = services(len);
        let h = seeded(&rt, &before);

        h.backend.reply(status, json!({ "message": "rejected" }));
        let changed = service("s0", "Changed", 1.0);
        prop_assert!(!rt.block_on(h.stores.services.update_service(&changed)));
        h.backend.reply(status, json!({}));
        prop_assert!(!rt.block_on(h.stores.services.delete_service("s0")));
        h.backend.reply_empty(status);
        rt.block_on(h.stores.services.fetch_services("v1"));

        prop_assert_eq!(h.stores.services.services(), before);
        prop_assert!(!h.stores.services.loading());
    }
}
