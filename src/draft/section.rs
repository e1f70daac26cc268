//! SectionState - the per-section edit state machine.

use serde_json::{Map, Value};

use super::list;
use super::{LoadOutcome, Section, SectionPayload};
use crate::error::DraftError;

/// Current values of one section plus the snapshot taken when editing began.
///
/// A section is editing exactly when a snapshot exists, so it can never be
/// editing without something to roll back to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionState<S> {
    values: S,
    original: Option<S>,
}

impl<S: Section> SectionState<S> {
    pub fn new(values: S) -> Self {
        Self {
            values,
            original: None,
        }
    }

    pub fn name(&self) -> &'static str {
        S::NAME
    }

    pub fn values(&self) -> &S {
        &self.values
    }

    /// Snapshot taken at `begin_edit`, present only while editing.
    pub fn original(&self) -> Option<&S> {
        self.original.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    /// Copy every non-null field of `source` that the section knows over the
    /// current values. Fields missing from `source` keep their value.
    ///
    /// Does nothing while editing.
    pub fn load(&mut self, source: &Value) -> Result<LoadOutcome, DraftError> {
        if self.is_editing() {
            tracing::debug!(section = S::NAME, "load skipped, section is being edited");
            return Ok(LoadOutcome::Skipped);
        }

        let fields = match source {
            Value::Null => return Ok(LoadOutcome::Loaded),
            Value::Object(fields) => fields,
            other => {
                return Err(DraftError::InvalidValue {
                    section: S::NAME,
                    message: format!("expected an object, got {other}"),
                })
            }
        };

        let mut current = self.to_object()?;
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            if let Some(slot) = current.get_mut(key) {
                *slot = value.clone();
            }
        }

        self.values = Self::from_object(current)?;
        Ok(LoadOutcome::Loaded)
    }

    pub fn begin_edit(&mut self) -> Result<(), DraftError> {
        if self.is_editing() {
            return Err(DraftError::AlreadyEditing(S::NAME));
        }
        self.original = Some(self.values.clone());
        Ok(())
    }

    /// Apply a typed change to the values.
    pub fn update(&mut self, change: impl FnOnce(&mut S)) -> Result<(), DraftError> {
        self.ensure_editing()?;
        change(&mut self.values);
        Ok(())
    }

    /// Overwrite exactly one field, addressed by its serialized name.
    pub fn update_field(&mut self, field: &str, value: Value) -> Result<(), DraftError> {
        self.ensure_editing()?;

        let mut current = self.to_object()?;
        match current.get_mut(field) {
            Some(slot) => *slot = value,
            None => {
                return Err(DraftError::UnknownField {
                    section: S::NAME,
                    field: field.to_string(),
                })
            }
        }

        self.values = Self::from_object(current)?;
        Ok(())
    }

    pub fn push_element(&mut self, field: &str, value: Value) -> Result<(), DraftError> {
        let items = self.list_field(field)?;
        self.update_field(field, Value::Array(list::with_pushed(&items, value)))
    }

    pub fn replace_element(
        &mut self,
        field: &str,
        index: usize,
        value: Value,
    ) -> Result<(), DraftError> {
        let items = self.list_field(field)?;
        let next = list::with_replaced(&items, index, value)
            .ok_or_else(|| out_of_range(field, index, items.len()))?;
        self.update_field(field, Value::Array(next))
    }

    pub fn remove_element(&mut self, field: &str, index: usize) -> Result<(), DraftError> {
        let items = self.list_field(field)?;
        let next = list::with_removed(&items, index)
            .ok_or_else(|| out_of_range(field, index, items.len()))?;
        self.update_field(field, Value::Array(next))
    }

    /// Finish editing, keeping the edited values.
    ///
    /// Call after the payload was persisted.
    pub fn save(&mut self) -> Result<(), DraftError> {
        self.ensure_editing()?;
        self.original = None;
        Ok(())
    }

    /// Finish editing, restoring the snapshot.
    pub fn cancel_edit(&mut self) -> Result<(), DraftError> {
        match self.original.take() {
            Some(original) => {
                self.values = original;
                Ok(())
            }
            None => Err(DraftError::NotEditing(S::NAME)),
        }
    }

    /// Normalized values, ready to persist.
    pub fn payload(&self) -> Result<SectionPayload, DraftError> {
        let values = serde_json::to_value(self.values.normalized()).map_err(|e| {
            DraftError::InvalidValue {
                section: S::NAME,
                message: e.to_string(),
            }
        })?;
        Ok(SectionPayload {
            section: S::NAME,
            values,
        })
    }

    /// Back to defaults, not editing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_editing(&self) -> Result<(), DraftError> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(DraftError::NotEditing(S::NAME))
        }
    }

    fn list_field(&self, field: &str) -> Result<Vec<Value>, DraftError> {
        self.ensure_editing()?;
        match self.to_object()?.remove(field) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DraftError::NotAList {
                section: S::NAME,
                field: field.to_string(),
            }),
            None => Err(DraftError::UnknownField {
                section: S::NAME,
                field: field.to_string(),
            }),
        }
    }

    fn to_object(&self) -> Result<Map<String, Value>, DraftError> {
        match serde_json::to_value(&self.values) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(DraftError::NotAnObject(S::NAME)),
            Err(e) => Err(DraftError::InvalidValue {
                section: S::NAME,
                message: e.to_string(),
            }),
        }
    }

    fn from_object(fields: Map<String, Value>) -> Result<S, DraftError> {
        serde_json::from_value(Value::Object(fields)).map_err(|e| DraftError::InvalidValue {
            section: S::NAME,
            message: e.to_string(),
        })
    }
}

fn out_of_range(field: &str, index: usize, len: usize) -> DraftError {
    DraftError::IndexOutOfRange {
        field: field.to_string(),
        index,
        len,
    }
}
