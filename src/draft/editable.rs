use serde_json::Value;

use super::{LoadOutcome, Section, SectionPayload, SectionState};
use crate::error::DraftError;

/// Object-safe view of a section's edit state, so a document can hand out
/// any of its sections by name.
pub trait EditableSection: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_editing(&self) -> bool;

    fn load(&mut self, source: &Value) -> Result<LoadOutcome, DraftError>;

    fn begin_edit(&mut self) -> Result<(), DraftError>;

    fn update_field(&mut self, field: &str, value: Value) -> Result<(), DraftError>;

    fn push_element(&mut self, field: &str, value: Value) -> Result<(), DraftError>;

    fn replace_element(
        &mut self,
        field: &str,
        index: usize,
        value: Value,
    ) -> Result<(), DraftError>;

    fn remove_element(&mut self, field: &str, index: usize) -> Result<(), DraftError>;

    fn save(&mut self) -> Result<(), DraftError>;

    fn cancel_edit(&mut self) -> Result<(), DraftError>;

    fn payload(&self) -> Result<SectionPayload, DraftError>;

    /// Current values as JSON.
    fn values(&self) -> Result<Value, DraftError>;

    fn reset(&mut self);
}

impl<S: Section> EditableSection for SectionState<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn is_editing(&self) -> bool {
        SectionState::is_editing(self)
    }

    fn load(&mut self, source: &Value) -> Result<LoadOutcome, DraftError> {
        SectionState::load(self, source)
    }

    fn begin_edit(&mut self) -> Result<(), DraftError> {
        SectionState::begin_edit(self)
    }

    fn update_field(&mut self, field: &str, value: Value) -> Result<(), DraftError> {
        SectionState::update_field(self, field, value)
    }

    fn push_element(&mut self, field: &str, value: Value) -> Result<(), DraftError> {
        SectionState::push_element(self, field, value)
    }

    fn replace_element(
        &mut self,
        field: &str,
        index: usize,
        value: Value,
    ) -> Result<(), DraftError> {
        SectionState::replace_element(self, field, index, value)
    }

    fn remove_element(&mut self, field: &str, index: usize) -> Result<(), DraftError> {
        SectionState::remove_element(self, field, index)
    }

    fn save(&mut self) -> Result<(), DraftError> {
        SectionState::save(self)
    }

    fn cancel_edit(&mut self) -> Result<(), DraftError> {
        SectionState::cancel_edit(self)
    }

    fn payload(&self) -> Result<SectionPayload, DraftError> {
        SectionState::payload(self)
    }

    fn values(&self) -> Result<Value, DraftError> {
        serde_json::to_value(SectionState::values(self)).map_err(|e| DraftError::InvalidValue {
            section: S::NAME,
            message: e.to_string(),
        })
    }

    fn reset(&mut self) {
        SectionState::reset(self)
    }
}
