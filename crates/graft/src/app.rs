use crate::{schema::InputObjectSchema, Config};

use graft_core::{
    schema::{Model, ModelId},
    Driver, Error, NodeResolver, Result,
};

use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// Application context threaded into every registration and invocation
/// call.
///
/// Owns the registered model descriptors, the API type name for each model,
/// the collaborator handles, the process-wide [`Config`], and the mutation
/// schema registry. Built once at startup; the schema registry is written
/// while mutation types are declared and is read-only afterwards, so
/// concurrent readers are safe.
pub struct App {
    models: IndexMap<ModelId, Model>,
    type_names: IndexMap<ModelId, String>,
    driver: Arc<dyn Driver>,
    resolver: Arc<dyn NodeResolver>,
    config: Config,
    schemas: RwLock<IndexMap<String, InputObjectSchema>>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// The API object type name registered for the model.
    ///
    /// `None` means the model has no API type; relation fragments pointing
    /// at it export `of_type: null`, which signals a configuration gap
    /// rather than a runtime error.
    pub fn type_for(&self, id: ModelId) -> Option<&str> {
        self.type_names.get(&id).map(String::as_str)
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn resolver(&self) -> &dyn NodeResolver {
        &*self.resolver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a declared mutation's input schema by its input type name.
    pub fn schema(&self, input_type: &str) -> Option<InputObjectSchema> {
        self.schemas
            .read()
            .expect("schema registry poisoned")
            .get(input_type)
            .cloned()
    }

    /// Export every declared input schema, in declaration order.
    pub fn schemas(&self) -> Vec<InputObjectSchema> {
        self.schemas
            .read()
            .expect("schema registry poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub(crate) fn register_schema(&self, schema: InputObjectSchema) {
        self.schemas
            .write()
            .expect("schema registry poisoned")
            .insert(schema.object_type.clone(), schema);
    }
}

#[derive(Default)]
pub struct AppBuilder {
    models: Vec<Model>,
    type_names: Vec<(ModelId, String)>,
    driver: Option<Arc<dyn Driver>>,
    resolver: Option<Arc<dyn NodeResolver>>,
    config: Config,
}

impl AppBuilder {
    /// Register a model descriptor.
    pub fn model(mut self, model: Model) -> AppBuilder {
        self.models.push(model);
        self
    }

    /// Register the API object type name for a model.
    pub fn type_name(mut self, model: impl Into<ModelId>, name: impl Into<String>) -> AppBuilder {
        self.type_names.push((model.into(), name.into()));
        self
    }

    pub fn driver(mut self, driver: Arc<dyn Driver>) -> AppBuilder {
        self.driver = Some(driver);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn NodeResolver>) -> AppBuilder {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(mut self, config: Config) -> AppBuilder {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<App> {
        let driver = self
            .driver
            .ok_or_else(|| Error::msg("cannot build an app without a driver"))?;
        let resolver = self
            .resolver
            .ok_or_else(|| Error::msg("cannot build an app without a node resolver"))?;

        let mut models = IndexMap::new();
        for model in self.models {
            if models.insert(model.id, model).is_some() {
                return Err(Error::msg("duplicate model ID registered with the app"));
            }
        }

        let mut type_names = IndexMap::new();
        for (id, name) in self.type_names {
            if !models.contains_key(&id) {
                return Err(Error::msg(format!(
                    "type name `{name}` registered for an unknown model"
                )));
            }
            type_names.insert(id, name);
        }

        Ok(App {
            models,
            type_names,
            driver,
            resolver,
            config: self.config,
            schemas: RwLock::new(IndexMap::new()),
        })
    }
}
