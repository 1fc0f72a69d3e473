use crate::{
    schema::{Model, ModelId},
    Value,
};

use indexmap::IndexMap;

/// One materialized row, borrowed from or destined for the persistence
/// collaborator.
///
/// Instances are dynamic records: the mutation framework never owns typed
/// model structs, it shuttles field values between the API surface and the
/// persistence engine. A freshly constructed instance carries no values; a
/// persisted one carries at least its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    model: ModelId,
    values: IndexMap<String, Value>,
}

impl Instance {
    /// Creates a fresh, unsaved instance of the given model.
    pub fn new(model: ModelId) -> Instance {
        Instance {
            model,
            values: IndexMap::new(),
        }
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// The instance's primary key value, if one has been assigned.
    pub fn primary_key(&self, model: &Model) -> Option<&Value> {
        debug_assert_eq!(self.model, model.id);
        self.values
            .get(model.primary_key_field().name.as_str())
            .filter(|value| !value.is_null())
    }

    pub fn set_primary_key(&mut self, model: &Model, value: Value) {
        debug_assert_eq!(self.model, model.id);
        self.values
            .insert(model.primary_key_field().name.clone(), value);
    }
}
