use super::SchemaFragment;

use serde::Serialize;

/// The exported schema of one declared mutation's input type, consumable by
/// clients for dynamic form generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputObjectSchema {
    /// The name of the input object
    pub object_type: String,

    /// The fields in the input object, in declaration order
    pub fields: Vec<SchemaFragment>,
}
