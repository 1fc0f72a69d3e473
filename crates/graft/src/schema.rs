mod fragment;
pub use fragment::{schema_for, FieldKind, SchemaFragment, Validation};

mod input;
pub use input::{derive_input_fields, InputField, InputTy};

mod registry;
pub use registry::InputObjectSchema;
