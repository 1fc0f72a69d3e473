use crate::{async_trait, Instance, Request, Result};

/// The node resolution collaborator: decodes client-supplied global ids
/// into materialized instances.
///
/// Resolution failures surface to clients as field-scoped validation
/// errors; implementations should return descriptive messages.
#[async_trait]
pub trait NodeResolver: Send + Sync {
    /// Resolve a single global id, optionally checking it decodes to the
    /// expected object type.
    async fn resolve_one(
        &self,
        request: &Request,
        global_id: &str,
        expected_type: Option<&str>,
    ) -> Result<Instance>;

    /// Resolve a list of global ids. Fails on the first unresolvable id.
    async fn resolve_many(
        &self,
        request: &Request,
        global_ids: &[String],
        expected_type: Option<&str>,
    ) -> Result<Vec<Instance>>;
}
