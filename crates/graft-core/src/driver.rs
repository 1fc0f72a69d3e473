use crate::{
    async_trait,
    auth::{PermissionMatch, Principal},
    schema::Model,
    Instance, Result,
};

use std::fmt::Debug;

/// The persistence collaborator.
///
/// Graft borrows persistence: it never owns storage, it orchestrates calls
/// into an engine that does. Implementations decide between insert and
/// update by primary key presence and are responsible for populating auto
/// fields on insert.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Persist the instance.
    async fn save(&self, model: &Model, instance: &mut Instance) -> Result<()>;

    /// Delete the instance. Implementations may clear the in-memory primary
    /// key; callers that need it afterwards must capture it first.
    async fn delete(&self, model: &Model, instance: &mut Instance) -> Result<()>;

    /// Run full model-level validation, skipping the named fields.
    ///
    /// Failures must be reported as validation errors
    /// ([`Error::validation`](crate::Error::validation)); anything else is
    /// treated as an infrastructure fault.
    async fn full_clean(&self, model: &Model, instance: &Instance, exclude: &[String])
        -> Result<()>;

    /// Replace the contents of a collection relation with the given
    /// instances.
    async fn set_relation(
        &self,
        model: &Model,
        instance: &Instance,
        field: &str,
        related: &[Instance],
    ) -> Result<()>;

    /// Open a transaction scope. One mutation executes at most one scope at
    /// a time; nesting is not required.
    async fn begin(&self) -> Result<()>;

    async fn commit(&self) -> Result<()>;

    async fn rollback(&self) -> Result<()>;

    /// The per-object permission capability.
    ///
    /// `None` means instances of this driver's models carry no per-object
    /// permissions and every object-level check is granted.
    fn object_guard(&self) -> Option<&dyn ObjectGuard> {
        None
    }
}

/// Per-object permission evaluation, scoped to a specific instance rather
/// than the caller's role in general.
#[async_trait]
pub trait ObjectGuard: Send + Sync {
    async fn has_permission(
        &self,
        principal: &dyn Principal,
        instance: &Instance,
        names: &[String],
        mode: PermissionMatch,
    ) -> Result<bool>;
}
