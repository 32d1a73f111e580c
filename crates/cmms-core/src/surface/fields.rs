use enum_map::EnumMap;

use super::FieldValidationDisplay;
use crate::validation::Field;

/// One inline error slot per form field.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    slots: EnumMap<Field, Option<String>>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slots[field].as_deref()
    }

    pub fn has_errors(&self) -> bool {
        self.slots.values().any(Option::is_some)
    }
}

impl FieldValidationDisplay for FieldErrors {
    fn show_field_error(&mut self, field: Field, message: &str) {
        self.slots[field] = Some(message.to_string());
    }

    fn clear_field_error(&mut self, field: Field) {
        self.slots[field] = None;
    }
}
