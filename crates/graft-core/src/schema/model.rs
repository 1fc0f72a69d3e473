use super::{Field, Name};
use crate::{Error, Result};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the application
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// Fields contained by the model, in declaration order.
    ///
    /// The order is client-visible: derived input fields and exported
    /// schemas follow it exactly.
    pub fields: Vec<Field>,

    /// Index of the primary key field within `fields`
    pub primary_key: usize,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    /// Creates a model descriptor from its fields.
    ///
    /// Exactly one field must be flagged as the primary key.
    pub fn new(id: ModelId, name: impl Into<Name>, fields: Vec<Field>) -> Result<Model> {
        let name = name.into();

        let mut primary_key = None;
        for (index, field) in fields.iter().enumerate() {
            if field.primary_key {
                if primary_key.is_some() {
                    return Err(Error::msg(format!(
                        "model `{}` declares more than one primary key field",
                        name.upper_camel_case(),
                    )));
                }
                primary_key = Some(index);
            }
        }

        let Some(primary_key) = primary_key else {
            return Err(Error::msg(format!(
                "model `{}` has no primary key field",
                name.upper_camel_case(),
            )));
        };

        Ok(Model {
            id,
            name,
            fields,
            primary_key,
        })
    }

    /// Get a field by index
    pub fn field(&self, index: usize) -> &Field {
        &self.fields[index]
    }

    /// Find a field by name
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key_field(&self) -> &Field {
        &self.fields[self.primary_key]
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
