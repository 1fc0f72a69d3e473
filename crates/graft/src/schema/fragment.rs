use crate::App;

use graft_core::{
    schema::{Choice, Field, FieldTy, Name, ScalarKind},
    Error, Result,
};

use serde::Serialize;

/// The client-facing kind of one input field.
///
/// Clients use this to pick a form widget and client-side validation; it is
/// intentionally coarser than the persistence layer's scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Id,
    Json,
    String,
    Text,
    Boolean,
    Integer,
    Decimal,
    Float,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Time,
    Email,
    Slug,
    Phone,
    Uuid,
    Ip,
    Url,
    File,
    Password,
}

/// Validation metadata for one input field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    /// Mirrors the input field's required flag after all override rules
    /// apply.
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_digits: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u8>,
}

/// Normalized description of one field's client-facing type and validation,
/// independent of the mutation invoking it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaFragment {
    /// Camel-cased field name as it appears in the API
    pub name: String,

    pub kind: FieldKind,

    /// The related object type name for id kinds; `None` when the target
    /// type is not registered (a configuration gap, not a runtime error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_type: Option<String>,

    /// True if this field expects an array of values
    pub multiple: bool,

    /// True if clients should render this field hidden
    pub hidden: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,

    /// The field's intrinsic default, as JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    pub validation: Validation,
}

/// Maps a persistence field descriptor to its normalized schema fragment.
///
/// Pure and total over the supported field kinds; an unmappable kind is a
/// declaration-time [`Error::schema_mapping`] failure, never a per-request
/// condition.
pub fn schema_for(field: &Field, app: &App) -> Result<SchemaFragment> {
    let (kind, of_type, multiple) = map_ty(&field.ty, field, app)?;

    let mut validation = Validation {
        required: super::input::required_by_default(field),
        ..Validation::default()
    };

    if let Some(length) = field.length_constraint() {
        validation.min_length = length.min;
        validation.max_length = length.max;
    }
    if let Some(range) = field.range_constraint() {
        validation.min_value = range.min;
        validation.max_value = range.max;
    }
    if let FieldTy::Scalar(ScalarKind::Decimal {
        max_digits,
        decimal_places,
    }) = &field.ty
    {
        validation.max_digits = Some(*max_digits);
        validation.decimal_places = Some(*decimal_places);
    }

    Ok(SchemaFragment {
        name: Name::new(&field.name).camel_case(),
        kind,
        of_type,
        multiple,
        hidden: field.primary_key,
        label: field.label.clone(),
        help_text: field.help_text.clone(),
        choices: field.choices.clone(),
        default_value: field.default.as_ref().map(|value| value.to_json()),
        validation,
    })
}

fn map_ty(ty: &FieldTy, field: &Field, app: &App) -> Result<(FieldKind, Option<String>, bool)> {
    match ty {
        FieldTy::Scalar(kind) => Ok((map_scalar(*kind, field)?, None, false)),

        // Array-like fields take their element's mapping
        FieldTy::List(element) => {
            let (kind, of_type, _) = map_ty(element, field, app)?;
            Ok((kind, of_type, true))
        }

        FieldTy::BelongsTo(rel) => Ok((FieldKind::Id, type_name(app, rel.target), false)),
        FieldTy::HasOne(rel) => Ok((FieldKind::Id, type_name(app, rel.target), false)),
        FieldTy::HasMany(rel) => Ok((FieldKind::Id, type_name(app, rel.target), true)),
        FieldTy::ManyToMany(rel) => Ok((FieldKind::Id, type_name(app, rel.target), true)),
        FieldTy::ManyToManyRev(rel) => Ok((FieldKind::Id, type_name(app, rel.target), true)),
    }
}

fn type_name(app: &App, target: graft_core::schema::ModelId) -> Option<String> {
    app.type_for(target).map(str::to_string)
}

fn map_scalar(kind: ScalarKind, field: &Field) -> Result<FieldKind> {
    let mapped = match kind {
        ScalarKind::Varchar => FieldKind::String,
        ScalarKind::Text => FieldKind::Text,
        ScalarKind::Email => FieldKind::Email,
        ScalarKind::Slug => FieldKind::Slug,
        ScalarKind::Phone => FieldKind::Phone,
        ScalarKind::Password => FieldKind::Password,
        ScalarKind::Url => FieldKind::Url,
        ScalarKind::Uuid => FieldKind::Uuid,
        ScalarKind::Ip => FieldKind::Ip,
        ScalarKind::File | ScalarKind::Image => FieldKind::File,
        ScalarKind::Bool => FieldKind::Boolean,
        ScalarKind::SmallInt | ScalarKind::Int | ScalarKind::BigInt => FieldKind::Integer,
        ScalarKind::Float => FieldKind::Float,
        ScalarKind::Decimal { .. } => FieldKind::Decimal,
        ScalarKind::Date => FieldKind::Date,
        ScalarKind::DateTime => FieldKind::DateTime,
        ScalarKind::Time => FieldKind::Time,
        ScalarKind::Json => FieldKind::Json,
        other => {
            return Err(Error::schema_mapping(format!(
                "persistence field kind `{other:?}` (field `{}`) has no client-facing mapping",
                field.name,
            )));
        }
    };

    Ok(mapped)
}
