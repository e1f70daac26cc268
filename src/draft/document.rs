//! The vendor landing page as a draft document, and the save flow that ties
//! a section edit to a store's persistence call.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use super::list;
use super::{EditableSection, SaveFailurePolicy, SectionPayload, SectionState};
use crate::config::EditorConfig;
use crate::domains::VendorPage;
use crate::error::DraftError;
use crate::Section;

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Section)]
#[section(name = "header", normalize = "trimmed")]
pub struct HeaderSection {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub cta_label: String,
}

impl Default for HeaderSection {
    fn default() -> Self {
        Self {
            title: "Your Business Name".into(),
            subtitle: "Tell travellers what makes you special".into(),
            image: String::new(),
            cta_label: "Book now".into(),
        }
    }
}

impl HeaderSection {
    fn trimmed(&self) -> Self {
        Self {
            title: trim(&self.title),
            subtitle: trim(&self.subtitle),
            image: trim(&self.image),
            cta_label: trim(&self.cta_label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Section)]
#[section(name = "about", normalize = "trimmed")]
pub struct AboutSection {
    pub title: String,
    pub body: String,
    pub image: String,
}

impl Default for AboutSection {
    fn default() -> Self {
        Self {
            title: "About Us".into(),
            body: "Share your story, your team and your experience.".into(),
            image: String::new(),
        }
    }
}

impl AboutSection {
    fn trimmed(&self) -> Self {
        Self {
            title: trim(&self.title),
            body: trim(&self.body),
            image: trim(&self.image),
        }
    }
}

/// One row of the features grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Feature {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Section)]
#[section(name = "features", normalize = "without_blank_rows")]
pub struct FeaturesSection {
    pub title: String,
    pub items: Vec<Feature>,
}

impl Default for FeaturesSection {
    fn default() -> Self {
        Self {
            title: "Why Choose Us".into(),
            items: vec![
                Feature::new("star", "Trusted", "Verified by hundreds of guests."),
                Feature::new("clock", "Fast", "Confirmation within 24 hours."),
                Feature::new("shield", "Safe", "Secure payments and clear policies."),
            ],
        }
    }
}

impl FeaturesSection {
    fn without_blank_rows(&self) -> Self {
        Self {
            title: trim(&self.title),
            items: self
                .items
                .iter()
                .filter(|item| !item.is_blank())
                .map(|item| Feature {
                    icon: trim(&item.icon),
                    title: trim(&item.title),
                    description: trim(&item.description),
                })
                .collect(),
        }
    }
}

/// One step of the "how it works" strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Section)]
#[section(name = "process", normalize = "without_blank_rows")]
pub struct ProcessSection {
    pub title: String,
    pub steps: Vec<ProcessStep>,
}

impl Default for ProcessSection {
    fn default() -> Self {
        let step = |title: &str, description: &str| ProcessStep {
            title: title.into(),
            description: description.into(),
        };
        Self {
            title: "How It Works".into(),
            steps: vec![
                step("Choose", "Pick the service that fits your trip."),
                step("Book", "Reserve online in a few clicks."),
                step("Enjoy", "We take care of the rest."),
            ],
        }
    }
}

impl ProcessSection {
    fn without_blank_rows(&self) -> Self {
        Self {
            title: trim(&self.title),
            steps: self
                .steps
                .iter()
                .filter(|step| !step.title.trim().is_empty())
                .map(|step| ProcessStep {
                    title: trim(&step.title),
                    description: trim(&step.description),
                })
                .collect(),
        }
    }
}

/// One pricing card. `features` is the bullet list printed on the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTier {
    pub name: String,
    pub price: f64,
    pub period: String,
    pub features: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Section)]
#[section(name = "pricing", normalize = "without_blank_rows")]
pub struct PricingSection {
    pub title: String,
    pub tiers: Vec<PricingTier>,
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            title: "Pricing".into(),
            tiers: vec![
                PricingTier {
                    name: "Basic".into(),
                    price: 49.0,
                    period: "per person".into(),
                    features: vec!["Standard service".into(), "Email support".into()],
                    highlighted: false,
                },
                PricingTier {
                    name: "Premium".into(),
                    price: 99.0,
                    period: "per person".into(),
                    features: vec![
                        "Priority booking".into(),
                        "Private guide".into(),
                        "24/7 support".into(),
                    ],
                    highlighted: true,
                },
            ],
        }
    }
}

impl PricingSection {
    fn without_blank_rows(&self) -> Self {
        Self {
            title: trim(&self.title),
            tiers: self
                .tiers
                .iter()
                .filter(|tier| !tier.name.trim().is_empty())
                .map(|tier| PricingTier {
                    name: trim(&tier.name),
                    price: tier.price,
                    period: trim(&tier.period),
                    features: tier
                        .features
                        .iter()
                        .map(|f| trim(f))
                        .filter(|f| !f.is_empty())
                        .collect(),
                    highlighted: tier.highlighted,
                })
                .collect(),
        }
    }
}

fn trim(s: &str) -> String {
    s.trim().to_string()
}

// ============================================================================
// Section names
// ============================================================================

/// Addresses one section of a `PageDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Header,
    About,
    Features,
    Process,
    Pricing,
}

impl SectionName {
    /// Page order.
    pub const ALL: [SectionName; 5] = [
        SectionName::Header,
        SectionName::About,
        SectionName::Features,
        SectionName::Process,
        SectionName::Pricing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Header => HeaderSection::NAME,
            SectionName::About => AboutSection::NAME,
            SectionName::Features => FeaturesSection::NAME,
            SectionName::Process => ProcessSection::NAME,
            SectionName::Pricing => PricingSection::NAME,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Document
// ============================================================================

/// What `PageDocument::load` did, per section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Sections whose fetched fields were copied in.
    pub loaded: Vec<SectionName>,
    /// Sections left alone because they were being edited.
    pub skipped: Vec<SectionName>,
    /// Sections whose fetched value did not fit; they keep their prior values.
    pub rejected: Vec<(SectionName, DraftError)>,
}

/// Draft copy of a vendor's landing page.
///
/// Owned by one page. Created with placeholder content, seeded from a
/// fetched `VendorPage`, and reset when the page goes away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDocument {
    pub header: SectionState<HeaderSection>,
    pub about: SectionState<AboutSection>,
    pub features: SectionState<FeaturesSection>,
    pub process: SectionState<ProcessSection>,
    pub pricing: SectionState<PricingSection>,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: SectionName) -> &dyn EditableSection {
        match name {
            SectionName::Header => &self.header,
            SectionName::About => &self.about,
            SectionName::Features => &self.features,
            SectionName::Process => &self.process,
            SectionName::Pricing => &self.pricing,
        }
    }

    pub fn section_mut(&mut self, name: SectionName) -> &mut dyn EditableSection {
        match name {
            SectionName::Header => &mut self.header,
            SectionName::About => &mut self.about,
            SectionName::Features => &mut self.features,
            SectionName::Process => &mut self.process,
            SectionName::Pricing => &mut self.pricing,
        }
    }

    /// Seed sections from a fetched page. Sections absent from the page keep
    /// their values; sections being edited are skipped.
    pub fn load(&mut self, page: &VendorPage) -> LoadReport {
        let mut report = LoadReport::default();

        for name in SectionName::ALL {
            let Some(source) = page.section(name.as_str()) else {
                continue;
            };
            match self.section_mut(name).load(source) {
                Ok(super::LoadOutcome::Loaded) => report.loaded.push(name),
                Ok(super::LoadOutcome::Skipped) => report.skipped.push(name),
                Err(err) => {
                    tracing::warn!(section = %name, error = %err, "fetched section rejected");
                    report.rejected.push((name, err));
                }
            }
        }

        report
    }

    /// Sections currently being edited, in page order.
    pub fn editing(&self) -> Vec<SectionName> {
        SectionName::ALL
            .into_iter()
            .filter(|name| self.section(*name).is_editing())
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn push_tier_feature(
        &mut self,
        tier: usize,
        feature: impl Into<String>,
    ) -> Result<(), DraftError> {
        let feature = feature.into();
        self.edit_tier_features(tier, |features| Some(list::with_pushed(features, feature)), 0)
    }

    pub fn replace_tier_feature(
        &mut self,
        tier: usize,
        index: usize,
        feature: impl Into<String>,
    ) -> Result<(), DraftError> {
        let feature = feature.into();
        self.edit_tier_features(
            tier,
            |features| list::with_replaced(features, index, feature),
            index,
        )
    }

    pub fn remove_tier_feature(&mut self, tier: usize, index: usize) -> Result<(), DraftError> {
        self.edit_tier_features(tier, |features| list::with_removed(features, index), index)
    }

    fn edit_tier_features(
        &mut self,
        tier: usize,
        edit: impl FnOnce(&[String]) -> Option<Vec<String>>,
        index: usize,
    ) -> Result<(), DraftError> {
        if !self.pricing.is_editing() {
            return Err(DraftError::NotEditing(PricingSection::NAME));
        }

        let tiers = &self.pricing.values().tiers;
        let row = tiers.get(tier).ok_or_else(|| DraftError::IndexOutOfRange {
            field: "tiers".into(),
            index: tier,
            len: tiers.len(),
        })?;
        let features = edit(&row.features).ok_or_else(|| DraftError::IndexOutOfRange {
            field: format!("tiers[{tier}].features"),
            index,
            len: row.features.len(),
        })?;

        self.pricing.update(|pricing| {
            if let Some(row) = pricing.tiers.get_mut(tier) {
                row.features = features;
            }
        })
    }
}

// ============================================================================
// Save flow
// ============================================================================

/// Runs the save transition around a persistence call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftEditor {
    config: EditorConfig,
}

impl DraftEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Persist one section of `doc` and settle its edit.
    ///
    /// `persist` receives the normalized payload and resolves to whether the
    /// store accepted it. Accepted saves end the edit with the new values. A
    /// rejected save follows the configured `SaveFailurePolicy`.
    pub async fn save_section<F, Fut>(
        &self,
        doc: &mut PageDocument,
        name: SectionName,
        persist: F,
    ) -> Result<bool, DraftError>
    where
        F: FnOnce(SectionPayload) -> Fut,
        Fut: Future<Output = bool>,
    {
        let payload = {
            let section = doc.section(name);
            if !section.is_editing() {
                return Err(DraftError::NotEditing(name.as_str()));
            }
            section.payload()?
        };

        let saved = persist(payload).await;
        self.settle(doc.section_mut(name), saved)?;
        Ok(saved)
    }

    /// Same flow for a standalone section.
    pub async fn save_state<S, F, Fut>(
        &self,
        state: &mut SectionState<S>,
        persist: F,
    ) -> Result<bool, DraftError>
    where
        S: Section,
        F: FnOnce(SectionPayload) -> Fut,
        Fut: Future<Output = bool>,
    {
        if !state.is_editing() {
            return Err(DraftError::NotEditing(S::NAME));
        }
        let payload = state.payload()?;

        let saved = persist(payload).await;
        self.settle(state, saved)?;
        Ok(saved)
    }

    fn settle(&self, section: &mut dyn EditableSection, saved: bool) -> Result<(), DraftError> {
        if saved {
            tracing::debug!(section = section.name(), "section saved");
            return section.save();
        }

        match self.config.save_failure {
            SaveFailurePolicy::Rollback => {
                tracing::info!(section = section.name(), "save rejected, restoring snapshot");
                section.cancel_edit()
            }
            SaveFailurePolicy::KeepEditing => {
                tracing::info!(section = section.name(), "save rejected, keeping edits");
                Ok(())
            }
        }
    }
}
