mod app;
pub use app::{App, AppBuilder};

mod config;
pub use config::Config;

pub mod mutation;
pub use mutation::{
    Cleaned, CleanedInput, FieldError, Hooks, Mutation, MutationBuilder, MutationMode, Payload,
};

pub mod schema;
pub use schema::{FieldKind, InputField, InputObjectSchema, InputTy, SchemaFragment, Validation};

pub use graft_core::{
    async_trait, Driver, Error, Instance, NodeResolver, ObjectGuard, PermissionMatch, Principal,
    Request, Result, Upload, ValidationErrors, Value, NON_FIELD_ERRORS,
};
