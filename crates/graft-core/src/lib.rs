pub mod auth;
pub use auth::{PermissionMatch, Principal};

pub mod driver;
pub use driver::{Driver, ObjectGuard};

mod error;
pub use error::{Error, ValidationErrors, NON_FIELD_ERRORS};

mod instance;
pub use instance::Instance;

pub mod node;
pub use node::NodeResolver;

pub mod request;
pub use request::{Request, Upload};

pub mod schema;

mod value;
pub use value::Value;

/// A Result type alias that uses Graft's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
