use super::{hooks::NoHooks, Hooks, Mutation, MutationMode};
use crate::{
    schema::{derive_input_fields, InputObjectSchema},
    App,
};

use graft_core::{schema::ModelId, PermissionMatch, Result};

use std::sync::Arc;

/// Builder for declaring a mutation type.
///
/// `build` resolves the field policy, derives the input fields eagerly, and
/// registers the input schema with the app; an unmappable field kind fails
/// the declaration here, never at request time.
pub struct MutationBuilder {
    model: ModelId,
    mode: MutationMode,
    public: bool,
    permissions: Vec<String>,
    permission_match: PermissionMatch,
    object_permissions: Vec<String>,
    object_permission_match: PermissionMatch,
    only_fields: Vec<String>,
    exclude_fields: Vec<String>,
    required_fields: Option<Vec<String>>,
    return_field_name: Option<String>,
    input_type_name: Option<String>,
    hooks: Arc<dyn Hooks>,
}

impl MutationBuilder {
    pub(crate) fn new(model: ModelId) -> MutationBuilder {
        MutationBuilder {
            model,
            mode: MutationMode::Save,
            public: false,
            permissions: vec![],
            permission_match: PermissionMatch::default(),
            object_permissions: vec![],
            object_permission_match: PermissionMatch::default(),
            only_fields: vec![],
            exclude_fields: vec![],
            required_fields: None,
            return_field_name: None,
            input_type_name: None,
            hooks: Arc::new(NoHooks),
        }
    }

    pub fn mode(mut self, mode: MutationMode) -> MutationBuilder {
        self.mode = mode;
        self
    }

    /// Allow unauthenticated callers to execute this mutation.
    pub fn public(mut self, public: bool) -> MutationBuilder {
        self.public = public;
        self
    }

    /// Permissions to check against the caller.
    pub fn permissions<I, S>(mut self, names: I) -> MutationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn permission_match(mut self, mode: PermissionMatch) -> MutationBuilder {
        self.permission_match = mode;
        self
    }

    /// Per-object permissions to check against the target instance.
    pub fn object_permissions<I, S>(mut self, names: I) -> MutationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_permissions = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn object_permission_match(mut self, mode: PermissionMatch) -> MutationBuilder {
        self.object_permission_match = mode;
        self
    }

    /// Include only these fields in the mutation input.
    pub fn only_fields<I, S>(mut self, names: I) -> MutationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude these fields from the mutation input.
    pub fn exclude_fields<I, S>(mut self, names: I) -> MutationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Mark exactly these fields as required, overriding the default
    /// inference entirely.
    pub fn required_fields<I, S>(mut self, names: I) -> MutationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// The output field name carrying the mutated instance. Defaults to the
    /// model name in camel case.
    pub fn return_field_name(mut self, name: impl Into<String>) -> MutationBuilder {
        self.return_field_name = Some(name.into());
        self
    }

    /// The name the input schema is registered under. Defaults to
    /// `{Model}{Mode}Input`.
    pub fn input_type_name(mut self, name: impl Into<String>) -> MutationBuilder {
        self.input_type_name = Some(name.into());
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn Hooks>) -> MutationBuilder {
        self.hooks = hooks;
        self
    }

    /// Declare the mutation type, deriving its input fields and registering
    /// its schema with the app.
    pub fn build(self, app: &App) -> Result<Mutation> {
        let model = app.model(self.model);
        let pk_name = model.primary_key_field().name.clone();

        // The mode is pure field policy: rewrite the inclusion lists before
        // derivation instead of special-casing inside it.
        let mut only_fields = self.only_fields;
        let mut exclude_fields = self.exclude_fields;
        let mut required_fields = self.required_fields;

        match self.mode {
            MutationMode::Create => {
                if !exclude_fields.contains(&pk_name) {
                    exclude_fields.push(pk_name.clone());
                }
            }
            MutationMode::Update => {
                if !only_fields.is_empty() && !only_fields.contains(&pk_name) {
                    only_fields.insert(0, pk_name.clone());
                }
                if let Some(required) = &mut required_fields {
                    if !required.contains(&pk_name) {
                        required.insert(0, pk_name.clone());
                    }
                }
            }
            MutationMode::Save => {}
            MutationMode::Delete | MutationMode::Operation => {
                only_fields = vec![pk_name.clone()];
                required_fields = Some(vec![pk_name.clone()]);
            }
        }

        let mut input_fields = derive_input_fields(
            model,
            &only_fields,
            &exclude_fields,
            required_fields.as_deref(),
            app,
        )?;

        // With no explicit required list to carry it, an update still needs
        // its identifier: force it without disturbing the other fields'
        // inferred flags.
        if self.mode == MutationMode::Update && required_fields.is_none() {
            if let Some(field) = input_fields.get_mut(&pk_name) {
                field.required = true;
                field.schema.validation.required = true;
            }
        }

        let return_field_name = self
            .return_field_name
            .unwrap_or_else(|| model.name.camel_case());
        let input_type_name = self.input_type_name.unwrap_or_else(|| {
            format!(
                "{}{}Input",
                model.name.upper_camel_case(),
                self.mode.type_suffix(),
            )
        });

        app.register_schema(InputObjectSchema {
            object_type: input_type_name.clone(),
            fields: input_fields
                .values()
                .map(|field| field.schema.clone())
                .collect(),
        });

        Ok(Mutation {
            model: self.model,
            mode: self.mode,
            public: self.public,
            permissions: self.permissions,
            permission_match: self.permission_match,
            object_permissions: self.object_permissions,
            object_permission_match: self.object_permission_match,
            exclude_fields,
            input_fields,
            return_field_name,
            input_type_name,
            hooks: self.hooks,
        })
    }
}
