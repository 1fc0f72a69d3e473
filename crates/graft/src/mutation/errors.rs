use super::FieldError;

use graft_core::{schema::Name, ValidationErrors, NON_FIELD_ERRORS};

/// Flattens a structured validation failure into the ordered client-facing
/// error list.
///
/// Field names are translated from snake case to the camel case convention
/// used by the public schema; the non-field sentinel maps to `None`. Both
/// failure shapes translate exhaustively; no entry is dropped.
pub fn translate(errors: &ValidationErrors) -> Vec<FieldError> {
    match errors {
        ValidationErrors::Fields(fields) => fields
            .iter()
            .flat_map(|(field, messages)| {
                let field = if field == NON_FIELD_ERRORS {
                    None
                } else {
                    Some(Name::new(field).camel_case())
                };
                messages
                    .iter()
                    .map(move |message| FieldError::new(field.clone(), message))
            })
            .collect(),

        ValidationErrors::Messages(messages) => messages
            .iter()
            .map(|message| FieldError::non_field(message))
            .collect(),
    }
}
