//! The Attribute Registry: subject/object attribute maps plus
//! the `registered` bit, split out of `lib.rs` so the storage shape and
//! the Decision Orchestrator's message surface aren't tangled together
//! in one file.

use abac_core::{AttributeKey, AttributeValue, Identifier};
use ink::storage::Mapping;

#[ink::storage_item]
#[derive(Debug)]
pub struct AttributeRegistry {
    subject_attrs: Mapping<(Identifier, AttributeKey), AttributeValue>,
    object_attrs: Mapping<(Identifier, AttributeKey), AttributeValue>,
    subject_registered: Mapping<Identifier, bool>,
    object_registered: Mapping<Identifier, bool>,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self {
            subject_attrs: Mapping::default(),
            object_attrs: Mapping::default(),
            subject_registered: Mapping::default(),
            object_registered: Mapping::default(),
        }
    }
}

impl AttributeRegistry {
    pub fn subject_attr(&self, subject: Identifier, key: AttributeKey) -> AttributeValue {
        self.subject_attrs
            .get((subject, key))
            .unwrap_or(AttributeValue::ZERO)
    }

    pub fn object_attr(&self, object: Identifier, key: AttributeKey) -> AttributeValue {
        self.object_attrs
            .get((object, key))
            .unwrap_or(AttributeValue::ZERO)
    }

    pub fn is_subject_registered(&self, subject: Identifier) -> bool {
        self.subject_registered.get(subject).unwrap_or(false)
    }

    pub fn is_object_registered(&self, object: Identifier) -> bool {
        self.object_registered.get(object).unwrap_or(false)
    }

    /// Write one subject attribute. Sets the `registered` bit unconditionally,
    /// even for the degenerate single-write path.
    pub fn set_subject_attribute(&mut self, subject: Identifier, key: AttributeKey, value: AttributeValue) {
        self.subject_attrs.insert((subject, key), &value);
        self.subject_registered.insert(subject, &true);
    }

    pub fn set_object_attribute(&mut self, object: Identifier, key: AttributeKey, value: AttributeValue) {
        self.object_attrs.insert((object, key), &value);
        self.object_registered.insert(object, &true);
    }

    /// Batch write. Caller must have already checked `keys.len() ==
    /// values.len()`; this never partially applies because the length
    /// check happens before any individual write is issued.
    pub fn set_subject_attributes(&mut self, subject: Identifier, keys: &[AttributeKey], values: &[AttributeValue]) {
        for (key, value) in keys.iter().zip(values.iter()) {
            self.subject_attrs.insert((subject, *key), value);
        }
        self.subject_registered.insert(subject, &true);
    }

    pub fn set_object_attributes(&mut self, object: Identifier, keys: &[AttributeKey], values: &[AttributeValue]) {
        for (key, value) in keys.iter().zip(values.iter()) {
            self.object_attrs.insert((object, *key), value);
        }
        self.object_registered.insert(object, &true);
    }
}
