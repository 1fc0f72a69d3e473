use super::CleanedInput;
use crate::App;

use graft_core::{async_trait, Instance, Request, Result};

/// Extension points bracketing the raw persistence calls.
///
/// Every method defaults to a no-op; implementations override the points
/// they need without touching the orchestration order. An error returned
/// from any hook aborts the invocation and rolls back the transaction.
#[async_trait]
pub trait Hooks: Send + Sync {
    /// Runs after input cleaning and validation, immediately before the
    /// instance is saved.
    async fn before_save(
        &self,
        _app: &App,
        _request: &Request,
        _instance: &mut Instance,
        _cleaned: &CleanedInput,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs after the instance and its relation side-effects are saved.
    async fn after_save(
        &self,
        _app: &App,
        _request: &Request,
        _instance: &mut Instance,
        _cleaned: &CleanedInput,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs immediately before the instance is deleted.
    async fn before_delete(
        &self,
        _app: &App,
        _request: &Request,
        _instance: &mut Instance,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs after the instance is deleted, before its identifier is
    /// restored for the response.
    async fn after_delete(
        &self,
        _app: &App,
        _request: &Request,
        _instance: &mut Instance,
    ) -> Result<()> {
        Ok(())
    }

    /// The body of an [`Operation`](super::MutationMode::Operation)
    /// mutation, invoked with the resolved instance.
    async fn operate(
        &self,
        _app: &App,
        _request: &Request,
        _instance: &mut Instance,
    ) -> Result<()> {
        Ok(())
    }
}

/// The default hook set: every extension point is a no-op.
pub(crate) struct NoHooks;

#[async_trait]
impl Hooks for NoHooks {}
