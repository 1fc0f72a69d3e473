use crate::memory_driver::{MemoryDriver, State};

use graft::{Error, Instance, Request};
use graft_core::{async_trait, schema::ModelId, NodeResolver, Result};

use indexmap::IndexMap;
use std::sync::{Arc, Mutex};

/// Resolves `"TypeName:key"` global ids against the memory driver's rows.
pub struct MemoryResolver {
    state: Arc<Mutex<State>>,
    types: IndexMap<String, usize>,
}

impl MemoryResolver {
    pub fn new<I, S>(driver: &MemoryDriver, types: I) -> MemoryResolver
    where
        I: IntoIterator<Item = (S, ModelId)>,
        S: Into<String>,
    {
        MemoryResolver {
            state: driver.shared_state(),
            types: types
                .into_iter()
                .map(|(name, model)| (name.into(), model.0))
                .collect(),
        }
    }

    fn lookup(&self, global_id: &str, expected_type: Option<&str>) -> Result<Instance> {
        let Some((type_name, key)) = global_id.split_once(':') else {
            return Err(Error::msg(format!("invalid global id: `{global_id}`")));
        };

        if let Some(expected) = expected_type {
            if expected != type_name {
                return Err(Error::msg(format!(
                    "expected a `{expected}` id, got `{type_name}`"
                )));
            }
        }

        let Some(model) = self.types.get(type_name) else {
            return Err(Error::msg(format!("unknown type `{type_name}`")));
        };

        self.state
            .lock()
            .unwrap()
            .rows
            .get(&(*model, key.to_string()))
            .cloned()
            .ok_or_else(|| Error::msg(format!("could not resolve to a node: {global_id}")))
    }
}

#[async_trait]
impl NodeResolver for MemoryResolver {
    async fn resolve_one(
        &self,
        _request: &Request,
        global_id: &str,
        expected_type: Option<&str>,
    ) -> Result<Instance> {
        self.lookup(global_id, expected_type)
    }

    async fn resolve_many(
        &self,
        _request: &Request,
        global_ids: &[String],
        expected_type: Option<&str>,
    ) -> Result<Vec<Instance>> {
        global_ids
            .iter()
            .map(|global_id| self.lookup(global_id, expected_type))
            .collect()
    }
}
