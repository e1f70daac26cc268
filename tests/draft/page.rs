//! Seeding a draft document from a fetched page.

use marketplace_sync::{DraftError, PageDocument, SectionName};
use serde_json::json;

use crate::{fetched_page, sample_page};

#[test]
fn load_overrides_defaults_field_by_field() {
    let mut doc = PageDocument::new();
    let report = doc.load(&sample_page());

    assert_eq!(
        report.loaded,
        vec![SectionName::Header, SectionName::About, SectionName::Pricing]
    );
    assert!(report.skipped.is_empty());
    assert!(report.rejected.is_empty());

    let header = doc.header.values();
    assert_eq!(header.title, "Sunrise Tours");
    assert_eq!(header.subtitle, "Small groups, big views");
    // not in the fetched page
    assert_eq!(header.cta_label, "Book now");

    assert_eq!(doc.about.values().title, "About Us");
    assert_eq!(doc.about.values().body, "Family run since 1998.");

    let tiers = &doc.pricing.values().tiers;
    assert_eq!(tiers.len(), 2);
    assert!(tiers[1].highlighted);
    assert_eq!(tiers[0].period, "");

    // absent sections keep their placeholders
    assert_eq!(doc.features, PageDocument::default().features);
}

#[test]
fn load_skips_sections_being_edited() {
    let mut doc = PageDocument::new();
    let header = doc.section_mut(SectionName::Header);
    header.begin_edit().unwrap();
    header.update_field("title", json!("Unsaved title")).unwrap();

    let report = doc.load(&sample_page());

    assert_eq!(report.skipped, vec![SectionName::Header]);
    assert_eq!(doc.header.values().title, "Unsaved title");
    assert!(doc.header.is_editing());
    assert_eq!(doc.about.values().body, "Family run since 1998.");
}

#[test]
fn null_fields_keep_prior_values() {
    let mut doc = PageDocument::new();
    doc.load(&fetched_page(json!({
        "header": { "title": null, "subtitle": "Fresh subtitle", "unknown": 3 }
    })));

    assert_eq!(doc.header.values().title, "Your Business Name");
    assert_eq!(doc.header.values().subtitle, "Fresh subtitle");
}

#[test]
fn mistyped_section_is_rejected_and_kept() {
    let mut doc = PageDocument::new();
    let report = doc.load(&fetched_page(json!({
        "features": { "items": "not a list" },
        "process": "not an object",
        "about": { "title": "Hello" }
    })));

    assert_eq!(report.loaded, vec![SectionName::About]);
    let rejected: Vec<_> = report.rejected.iter().map(|(name, _)| *name).collect();
    assert_eq!(rejected, vec![SectionName::Features, SectionName::Process]);
    assert!(matches!(report.rejected[0].1, DraftError::InvalidValue { .. }));

    assert_eq!(doc.features, PageDocument::default().features);
    assert_eq!(doc.process, PageDocument::default().process);
}

#[test]
fn fetched_page_is_not_mutated_by_edits() {
    let page = sample_page();
    let mut doc = PageDocument::new();
    doc.load(&page);

    doc.pricing.begin_edit().unwrap();
    doc.push_tier_feature(0, "Snacks").unwrap();

    assert_eq!(page, sample_page());
    assert_eq!(doc.pricing.values().tiers[0].features, vec!["Guide", "Snacks"]);
}

#[test]
fn reset_restores_placeholders() {
    let mut doc = PageDocument::new();
    doc.load(&sample_page());
    doc.about.begin_edit().unwrap();

    doc.reset();
    assert_eq!(doc, PageDocument::new());
    assert!(doc.editing().is_empty());
}
