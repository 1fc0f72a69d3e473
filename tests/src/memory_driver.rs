use crate::exec_log::{DriverOp, ExecLog};

use graft::{Error, Instance, PermissionMatch, Principal, Value};
use graft_core::{
    async_trait,
    schema::{AutoStrategy, Model},
    Driver, ObjectGuard, Result, ValidationErrors,
};

use indexmap::IndexMap;
use std::sync::{Arc, Mutex};

/// An in-memory persistence driver with an operations log.
///
/// Implements just enough of the driver contract to exercise the mutation
/// lifecycle: upsert-by-key rows, snapshot-based transactions, and a
/// passable imitation of model-level validation. Every operation is logged
/// so tests can assert exactly which writes happened.
#[derive(Debug)]
pub struct MemoryDriver {
    state: Arc<Mutex<State>>,
    log: Arc<Mutex<Vec<DriverOp>>>,
    snapshot: Mutex<Option<State>>,
    forced_validation: Mutex<Option<ValidationErrors>>,
    save_denial: Mutex<Option<String>>,
    guard: Option<MemoryGuard>,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct State {
    /// (model index, row key) -> row
    pub(crate) rows: IndexMap<(usize, String), Instance>,

    /// (model index, row key, field) -> related rows
    pub(crate) relations: IndexMap<(usize, String, String), Vec<Instance>>,

    next_id: i64,
}

impl MemoryDriver {
    pub fn new() -> MemoryDriver {
        MemoryDriver {
            state: Arc::new(Mutex::new(State::default())),
            log: Arc::new(Mutex::new(Vec::new())),
            snapshot: Mutex::new(None),
            forced_validation: Mutex::new(None),
            save_denial: Mutex::new(None),
            guard: None,
        }
    }

    /// Install a per-object permission guard.
    pub fn with_object_guard<F>(mut self, decide: F) -> MemoryDriver
    where
        F: Fn(&dyn Principal, &Instance, &[String]) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(MemoryGuard {
            decide: Box::new(decide),
        });
        self
    }

    /// Make the next `full_clean` call fail with the given errors.
    pub fn fail_next_full_clean(&self, errors: ValidationErrors) {
        *self.forced_validation.lock().unwrap() = Some(errors);
    }

    /// Make every save raise an authorization failure with the given
    /// message.
    pub fn deny_saves(&self, message: impl Into<String>) {
        *self.save_denial.lock().unwrap() = Some(message.into());
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.log.clone())
    }

    pub(crate) fn shared_state(&self) -> Arc<Mutex<State>> {
        self.state.clone()
    }

    /// Insert a row directly, bypassing validation and logging. The row's
    /// primary key value must be provided.
    pub fn seed(&self, model: &Model, values: Vec<(&str, Value)>) -> Instance {
        let mut instance = Instance::new(model.id);
        for (name, value) in values {
            instance.set(name, value);
        }

        let key = instance
            .primary_key(model)
            .and_then(value_key)
            .expect("seeded rows need a primary key");

        let mut state = self.state.lock().unwrap();
        if let Some(Value::I64(n)) = instance.primary_key(model) {
            state.next_id = state.next_id.max(*n);
        }
        state.rows.insert((model.id.0, key), instance.clone());

        instance
    }

    /// Fetch a stored row by key.
    pub fn row(&self, model: &Model, key: impl std::fmt::Display) -> Option<Instance> {
        let state = self.state.lock().unwrap();
        state.rows.get(&(model.id.0, key.to_string())).cloned()
    }

    /// Fetch the stored contents of a collection relation.
    pub fn relation(
        &self,
        model: &Model,
        key: impl std::fmt::Display,
        field: &str,
    ) -> Vec<Instance> {
        let state = self.state.lock().unwrap();
        state
            .relations
            .get(&(model.id.0, key.to_string(), field.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn row_count(&self, model: &Model) -> usize {
        let state = self.state.lock().unwrap();
        state.rows.keys().filter(|(m, _)| *m == model.id.0).count()
    }

    fn record(&self, op: DriverOp) {
        self.log.lock().unwrap().push(op);
    }
}

impl Default for MemoryDriver {
    fn default() -> MemoryDriver {
        MemoryDriver::new()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn save(&self, model: &Model, instance: &mut Instance) -> Result<()> {
        self.record(DriverOp::Save { model: model.id.0 });

        if let Some(message) = self.save_denial.lock().unwrap().clone() {
            return Err(Error::permission_denied(message));
        }

        let mut state = self.state.lock().unwrap();

        let inserting = instance.primary_key(model).is_none();
        if inserting {
            // Fresh rows pick up field defaults the caller did not override.
            for field in &model.fields {
                if field.has_default() && instance.get(&field.name).is_none() {
                    instance.set(&field.name, field.intrinsic_default());
                }
            }

            let pk = model.primary_key_field();
            let value = match pk.auto {
                Some(AutoStrategy::Increment | AutoStrategy::Id) => {
                    state.next_id += 1;
                    Value::I64(state.next_id)
                }
                Some(AutoStrategy::Uuid) => {
                    state.next_id += 1;
                    Value::String(format!("{:032x}", state.next_id))
                }
                None => {
                    return Err(Error::msg(format!(
                        "cannot save `{}` without a primary key",
                        model.name.upper_camel_case(),
                    )));
                }
            };
            instance.set_primary_key(model, value);
        }

        let key = instance
            .primary_key(model)
            .and_then(value_key)
            .ok_or_else(|| Error::msg("unsupported primary key value"))?;

        state.rows.insert((model.id.0, key), instance.clone());
        Ok(())
    }

    async fn delete(&self, model: &Model, instance: &mut Instance) -> Result<()> {
        self.record(DriverOp::Delete { model: model.id.0 });

        let key = instance
            .primary_key(model)
            .and_then(value_key)
            .ok_or_else(|| Error::msg("cannot delete an unsaved instance"))?;

        let mut state = self.state.lock().unwrap();
        state.rows.shift_remove(&(model.id.0, key.clone()));
        state
            .relations
            .retain(|(m, k, _), _| !(*m == model.id.0 && *k == key));

        // The row is gone; drop the in-memory identifier with it.
        instance.set_primary_key(model, Value::Null);
        Ok(())
    }

    async fn full_clean(
        &self,
        model: &Model,
        instance: &Instance,
        exclude: &[String],
    ) -> Result<()> {
        self.record(DriverOp::FullClean { model: model.id.0 });

        if let Some(forced) = self.forced_validation.lock().unwrap().take() {
            return Err(Error::validation(forced));
        }

        let mut errors = ValidationErrors::new();

        for field in &model.fields {
            if exclude.contains(&field.name)
                || field.is_auto()
                || field.is_reverse_relation()
                || field.ty.is_collection()
            {
                continue;
            }

            let value = instance.get(&field.name);
            let missing = match value {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                _ => false,
            };

            if missing {
                if !field.nullable && !field.blank {
                    errors.push_field(&field.name, "this field cannot be blank");
                }
                continue;
            }

            if let (Some(length), Some(Value::String(s))) = (field.length_constraint(), value) {
                if let Some(max) = length.max {
                    if s.len() as u64 > max {
                        errors.push_field(
                            &field.name,
                            format!("ensure this value has at most {max} characters"),
                        );
                    }
                }
                if let Some(min) = length.min {
                    if (s.len() as u64) < min {
                        errors.push_field(
                            &field.name,
                            format!("ensure this value has at least {min} characters"),
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }

    async fn set_relation(
        &self,
        model: &Model,
        instance: &Instance,
        field: &str,
        related: &[Instance],
    ) -> Result<()> {
        self.record(DriverOp::SetRelation {
            model: model.id.0,
            field: field.to_string(),
        });

        let key = instance
            .primary_key(model)
            .and_then(value_key)
            .ok_or_else(|| Error::msg("cannot set a relation on an unsaved instance"))?;

        let mut state = self.state.lock().unwrap();
        state
            .relations
            .insert((model.id.0, key, field.to_string()), related.to_vec());
        Ok(())
    }

    async fn begin(&self) -> Result<()> {
        self.record(DriverOp::Begin);
        let state = self.state.lock().unwrap().clone();
        *self.snapshot.lock().unwrap() = Some(state);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        self.record(DriverOp::Commit);
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.record(DriverOp::Rollback);
        if let Some(snapshot) = self.snapshot.lock().unwrap().take() {
            *self.state.lock().unwrap() = snapshot;
        }
        Ok(())
    }

    fn object_guard(&self) -> Option<&dyn ObjectGuard> {
        self.guard.as_ref().map(|guard| guard as &dyn ObjectGuard)
    }
}

pub(crate) fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::I64(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

struct MemoryGuard {
    decide: Box<dyn Fn(&dyn Principal, &Instance, &[String]) -> bool + Send + Sync>,
}

impl std::fmt::Debug for MemoryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MemoryGuard")
    }
}

#[async_trait]
impl ObjectGuard for MemoryGuard {
    async fn has_permission(
        &self,
        principal: &dyn Principal,
        instance: &Instance,
        names: &[String],
        _mode: PermissionMatch,
    ) -> Result<bool> {
        Ok((self.decide)(principal, instance, names))
    }
}
