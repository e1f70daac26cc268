//! Draft editing - section-by-section edit / cancel / save with snapshot rollback.
//!
//! A draft document is split into independently editable sections. Each
//! section is a small state machine:
//!
//! ```text
//!            begin_edit (snapshot values)
//!   Viewing ───────────────────────────────▶ Editing
//!      ▲                                        │ update_field / *_element
//!      │   save (keep values) | cancel (restore)│
//!      └────────────────────────────────────────┘
//! ```
//!
//! `load` copies fetched fields over the current values and is a no-op for
//! a section that is mid-edit, so a refetch can never clobber unsaved work.
//!
//! ## Example
//!
//! ```ignore
//! use marketplace_sync::{DraftEditor, PageDocument, SectionName};
//!
//! let mut doc = PageDocument::new();
//! doc.load(&page);
//! doc.section_mut(SectionName::Header).begin_edit()?;
//! doc.section_mut(SectionName::Header).update_field("title", json!("Sunrise Tours"))?;
//! let saved = editor
//!     .save_section(&mut doc, SectionName::Header, |payload| {
//!         stores.pages.save_page_section(&vendor_id, &payload)
//!     })
//!     .await?;
//! ```

mod document;
mod editable;
pub mod list;
mod section;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub use document::{
    AboutSection, DraftEditor, Feature, FeaturesSection, HeaderSection, LoadReport, PageDocument,
    PricingSection, PricingTier, ProcessSection, ProcessStep, SectionName,
};
pub use editable::EditableSection;
pub use section::SectionState;

/// One editable region of a draft document.
///
/// Usually implemented with `#[derive(Section)]`. Values must serialize to a
/// JSON object so fields can be addressed by name.
pub trait Section:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Section name, also used as the key in the stored page.
    const NAME: &'static str;

    /// Cleaned-up copy of the values used as the save payload.
    fn normalized(&self) -> Self {
        self.clone()
    }
}

/// What a `load` did to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fetched fields were copied over the current values.
    Loaded,
    /// The section is being edited; nothing was touched.
    Skipped,
}

/// What happens to a section whose save was rejected remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFailurePolicy {
    /// Restore the snapshot taken at `begin_edit`.
    #[default]
    Rollback,
    /// Stay in editing mode with the attempted values so the user can retry.
    KeepEditing,
}

/// Normalized values of one section, ready to hand to a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionPayload {
    pub section: &'static str,
    pub values: Value,
}
