use super::{schema_for, SchemaFragment};
use crate::App;

use graft_core::{
    schema::{Field, FieldTy, Model, ScalarKind},
    Result,
};

use indexmap::IndexMap;

/// How the lifecycle engine interprets one input field when cleaning raw
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTy {
    /// A single global id, resolved to an instance
    Id,

    /// A list of global ids, resolved to instances as a unit
    IdList,

    /// An upload token, resolved against the request's file attachments
    Upload,

    /// Everything else passes through unchanged
    Value,
}

/// One derived mutation input field.
#[derive(Debug, Clone)]
pub struct InputField {
    pub name: String,

    pub ty: InputTy,

    /// Mirrored into `schema.validation.required`
    pub required: bool,

    /// Only set for the identifier field, where it references the target
    /// type name
    pub description: Option<String>,

    pub schema: SchemaFragment,
}

/// Derives the mutation input fields for a model, in field declaration
/// order.
///
/// `required_fields` being present switches required-ness to pure list
/// membership; otherwise relations are required iff non-nullable and
/// scalars iff they neither allow blank nor carry a default.
pub fn derive_input_fields(
    model: &Model,
    only_fields: &[String],
    exclude_fields: &[String],
    required_fields: Option<&[String]>,
    app: &App,
) -> Result<IndexMap<String, InputField>> {
    let include_reverse = app.config().include_reverse_relations;

    let mut ret = IndexMap::new();
    for field in &model.fields {
        let name = &field.name;

        if (!only_fields.is_empty() && !only_fields.contains(name))
            || exclude_fields.contains(name)
            || field.is_internal()
        {
            continue;
        }

        let (ty, description) = if field.primary_key {
            // The identifier selects the instance to mutate; it never sets
            // a value.
            let type_name = app
                .type_for(model.id)
                .map(str::to_string)
                .unwrap_or_else(|| model.name.upper_camel_case());
            (
                InputTy::Id,
                Some(format!("ID of the \"{type_name}\" to mutate")),
            )
        } else {
            if field.is_reverse_relation() && !include_reverse && only_fields.is_empty() {
                continue;
            }
            (input_ty(&field.ty), None)
        };

        let required = match required_fields {
            Some(required) => required.contains(name),
            None => required_by_default(field),
        };

        let mut schema = schema_for(field, app)?;
        schema.validation.required = required;

        ret.insert(
            name.clone(),
            InputField {
                name: name.clone(),
                ty,
                required,
                description,
                schema,
            },
        );
    }

    Ok(ret)
}

/// Default required-ness inference, applied when a mutation declares no
/// explicit required-field list.
pub(crate) fn required_by_default(field: &Field) -> bool {
    if field.is_relation() {
        !field.nullable
    } else {
        !field.blank && !field.has_default()
    }
}

fn input_ty(ty: &FieldTy) -> InputTy {
    match ty {
        FieldTy::Scalar(ScalarKind::File | ScalarKind::Image) => InputTy::Upload,
        FieldTy::BelongsTo(..) | FieldTy::HasOne(..) => InputTy::Id,
        FieldTy::HasMany(..) | FieldTy::ManyToMany(..) | FieldTy::ManyToManyRev(..) => {
            InputTy::IdList
        }
        FieldTy::Scalar(..) | FieldTy::List(..) => InputTy::Value,
    }
}
