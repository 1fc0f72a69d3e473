mod builder;
pub use builder::MutationBuilder;

mod cleaned;
pub use cleaned::{Cleaned, CleanedInput};

mod errors;
pub use errors::translate;

mod execute;

mod hooks;
pub use hooks::Hooks;

mod mode;
pub use mode::MutationMode;

mod payload;
pub use payload::{FieldError, Payload};

use crate::schema::InputField;

use graft_core::{schema::ModelId, PermissionMatch};

use indexmap::IndexMap;
use std::sync::Arc;

/// One declared mutation type.
///
/// Built once via [`Mutation::builder`] when the hosting API declares the
/// mutation; immutable afterwards and shared by every invocation of that
/// mutation kind.
pub struct Mutation {
    pub(crate) model: ModelId,
    pub(crate) mode: MutationMode,
    pub(crate) public: bool,
    pub(crate) permissions: Vec<String>,
    pub(crate) permission_match: PermissionMatch,
    pub(crate) object_permissions: Vec<String>,
    pub(crate) object_permission_match: PermissionMatch,
    pub(crate) exclude_fields: Vec<String>,
    pub(crate) input_fields: IndexMap<String, InputField>,
    pub(crate) return_field_name: String,
    pub(crate) input_type_name: String,
    pub(crate) hooks: Arc<dyn Hooks>,
}

impl std::fmt::Debug for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("public", &self.public)
            .field("permissions", &self.permissions)
            .field("permission_match", &self.permission_match)
            .field("object_permissions", &self.object_permissions)
            .field("object_permission_match", &self.object_permission_match)
            .field("exclude_fields", &self.exclude_fields)
            .field("input_fields", &self.input_fields)
            .field("return_field_name", &self.return_field_name)
            .field("input_type_name", &self.input_type_name)
            .finish_non_exhaustive()
    }
}

impl Mutation {
    pub fn builder(model: impl Into<ModelId>) -> MutationBuilder {
        MutationBuilder::new(model.into())
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn mode(&self) -> MutationMode {
        self.mode
    }

    /// The derived input fields, in model declaration order.
    pub fn input_fields(&self) -> &IndexMap<String, InputField> {
        &self.input_fields
    }

    /// The output field name the mutated instance is wrapped under.
    pub fn return_field_name(&self) -> &str {
        &self.return_field_name
    }

    /// The input type name this mutation's schema is registered under.
    pub fn input_type_name(&self) -> &str {
        &self.input_type_name
    }
}
