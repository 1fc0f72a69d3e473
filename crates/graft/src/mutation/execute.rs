use super::{translate, Cleaned, CleanedInput, FieldError, Mutation, MutationMode, Payload};
use crate::{schema::InputTy, App};

use graft_core::{schema::Model, Error, Instance, Request, Result, ValidationErrors, Value};

use indexmap::IndexMap;

impl Mutation {
    /// Execute the mutation against the given invocation context.
    ///
    /// Per-request failures (authorization, resolution, validation) are
    /// recovered into the payload's error list; only unexpected
    /// collaborator faults propagate as `Err`.
    pub async fn execute(
        &self,
        app: &App,
        request: &Request,
        input: IndexMap<String, Value>,
    ) -> Result<Payload> {
        if !self.check_permissions(request) {
            // The engine's own gate never escapes as a hard failure.
            return Ok(self.failure(vec![FieldError::non_field(
                Error::unauthorized().to_string(),
            )]));
        }

        match self.perform(app, request, input).await {
            Ok(payload) => Ok(payload),
            Err(err) => self.recover(app, err),
        }
    }

    fn check_permissions(&self, request: &Request) -> bool {
        let principal = request.principal();

        if !self.public && !principal.is_authenticated() {
            return false;
        }

        if self.permissions.is_empty() {
            return true;
        }

        principal.has_permissions(&self.permissions, self.permission_match)
    }

    /// Turns recoverable failures into the uniform error envelope.
    fn recover(&self, app: &App, err: Error) -> Result<Payload> {
        if err.is_unauthorized() {
            return Ok(self.failure(vec![FieldError::non_field(err.to_string())]));
        }

        if let Some((field, message)) = err.as_node_resolution() {
            let errors = ValidationErrors::field(field, message);
            return Ok(self.failure(translate(&errors)));
        }

        if let Some(errors) = err.as_validation() {
            return Ok(self.failure(translate(errors)));
        }

        if let Some(message) = err.denial_message().map(str::to_string) {
            if app.config().swallow_permission_denied {
                return Ok(self.failure(vec![FieldError::non_field(message)]));
            }
            return Err(err);
        }

        Err(err)
    }

    fn failure(&self, errors: Vec<FieldError>) -> Payload {
        Payload::failure(self.return_field_name.clone(), errors)
    }

    async fn perform(
        &self,
        app: &App,
        request: &Request,
        input: IndexMap<String, Value>,
    ) -> Result<Payload> {
        let model = app.model(self.model);

        // Everything from instance resolution through the post-persist
        // permission check lands atomically or not at all.
        app.driver().begin().await?;

        let result = match self.mode {
            MutationMode::Delete => self.perform_delete(app, request, model, &input).await,
            MutationMode::Operation => self.perform_operation(app, request, model, &input).await,
            _ => self.perform_save(app, request, model, &input).await,
        };

        match result {
            Ok(payload) => {
                app.driver().commit().await?;
                Ok(payload)
            }
            Err(err) => {
                let _ = app.driver().rollback().await;
                Err(err)
            }
        }
    }

    async fn perform_save(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        input: &IndexMap<String, Value>,
    ) -> Result<Payload> {
        let (mut instance, checked_permissions) = match self.instance_id(model, input)? {
            Some(id) => (self.get_instance(app, request, model, &id).await?, true),
            None => (Instance::new(model.id), false),
        };

        let cleaned = self.clean_input(app, request, model, input).await?;
        self.materialize(app, model, &mut instance, &cleaned);
        self.clean_instance(app, model, &instance).await?;
        self.save(app, request, model, &mut instance, &cleaned).await?;

        if !checked_permissions && !self.check_object_permissions(app, request, &instance).await? {
            // The model may grant permission based on fields only known
            // after creation, so a creation checks against the persisted
            // instance.
            return Err(Error::unauthorized());
        }

        Ok(Payload::success(self.return_field_name.clone(), instance))
    }

    async fn perform_delete(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        input: &IndexMap<String, Value>,
    ) -> Result<Payload> {
        let mut instance = self.get_target(app, request, model, input).await?;

        let db_id = instance.primary_key(model).cloned();

        self.hooks.before_delete(app, request, &mut instance).await?;
        app.driver().delete(model, &mut instance).await?;
        self.hooks.after_delete(app, request, &mut instance).await?;

        // Restore the identifier so the response still reports which row
        // was removed.
        if let Some(db_id) = db_id {
            instance.set_primary_key(model, db_id);
        }

        Ok(Payload::success(self.return_field_name.clone(), instance))
    }

    async fn perform_operation(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        input: &IndexMap<String, Value>,
    ) -> Result<Payload> {
        let mut instance = self.get_target(app, request, model, input).await?;

        self.hooks.operate(app, request, &mut instance).await?;

        Ok(Payload::success(self.return_field_name.clone(), instance))
    }

    /// The identifier submitted for the primary key input, when that input
    /// is declared.
    fn instance_id(&self, model: &Model, input: &IndexMap<String, Value>) -> Result<Option<String>> {
        let pk_name = model.primary_key_field().name.as_str();

        if !self.input_fields.contains_key(pk_name) {
            return Ok(None);
        }

        match input.get(pk_name) {
            Some(Value::String(id)) => Ok(Some(id.clone())),
            Some(Value::Null) | None => {
                if self.mode == MutationMode::Update || self.mode.id_only() {
                    Err(Error::validation_field(pk_name, "this field is required"))
                } else {
                    Ok(None)
                }
            }
            Some(other) => Err(Error::validation_field(
                pk_name,
                format!("expected an id, got {}", other.type_name()),
            )),
        }
    }

    /// Resolve the identifier-selected target for delete/operation modes.
    async fn get_target(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        input: &IndexMap<String, Value>,
    ) -> Result<Instance> {
        let pk_name = model.primary_key_field().name.as_str();
        let Some(id) = self.instance_id(model, input)? else {
            return Err(Error::validation_field(pk_name, "this field is required"));
        };
        self.get_instance(app, request, model, &id).await
    }

    /// Resolve an existing instance and check object permissions against
    /// it.
    async fn get_instance(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        id: &str,
    ) -> Result<Instance> {
        let pk_name = model.primary_key_field().name.as_str();
        let expected = app.type_for(model.id);

        let instance = match app.resolver().resolve_one(request, id, expected).await {
            Ok(instance) => instance,
            Err(err) => return Err(Error::node_resolution(pk_name, err.to_string())),
        };

        if !self.check_object_permissions(app, request, &instance).await? {
            return Err(Error::unauthorized());
        }

        Ok(instance)
    }

    async fn check_object_permissions(
        &self,
        app: &App,
        request: &Request,
        instance: &Instance,
    ) -> Result<bool> {
        if self.object_permissions.is_empty() {
            return Ok(true);
        }

        // Without the per-object capability every check is granted.
        let Some(guard) = app.driver().object_guard() else {
            return Ok(true);
        };

        guard
            .has_permission(
                request.principal(),
                instance,
                &self.object_permissions,
                self.object_permission_match,
            )
            .await
    }

    /// Resolve every declared input field present in the raw input.
    async fn clean_input(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        input: &IndexMap<String, Value>,
    ) -> Result<CleanedInput> {
        let mut cleaned = CleanedInput::new();

        for (name, input_field) in &self.input_fields {
            let Some(value) = input.get(name) else {
                // Absent is distinct from null; leave the field untouched.
                continue;
            };

            match input_field.ty {
                InputTy::IdList if !value.is_null() => {
                    let ids = list_of_ids(name, value)?;
                    let nodes = if ids.is_empty() {
                        vec![]
                    } else {
                        let expected = self.expected_type_for(app, model, name);
                        match app.resolver().resolve_many(request, &ids, expected).await {
                            Ok(nodes) => nodes,
                            Err(err) => {
                                return Err(Error::node_resolution(name, err.to_string()));
                            }
                        }
                    };
                    cleaned.insert(name.clone(), Cleaned::Nodes(nodes));
                }

                InputTy::Id if !value.is_null() => {
                    let id = id_str(name, value)?;
                    let expected = self.expected_type_for(app, model, name);
                    let node = match app.resolver().resolve_one(request, id, expected).await {
                        Ok(node) => node,
                        Err(err) => return Err(Error::node_resolution(name, err.to_string())),
                    };
                    cleaned.insert(name.clone(), Cleaned::Node(node));
                }

                InputTy::Upload if !value.is_null() => {
                    let token = id_str(name, value)?;
                    let Some(upload) = request.uploaded_file(token) else {
                        return Err(Error::validation_field(
                            name,
                            format!("no file uploaded for token `{token}`"),
                        ));
                    };
                    cleaned.insert(name.clone(), Cleaned::Upload(upload.clone()));
                }

                _ => {
                    cleaned.insert(name.clone(), Cleaned::Value(value.clone()));
                }
            }
        }

        Ok(cleaned)
    }

    /// Copy cleaned values onto the instance.
    ///
    /// Non-editable and auto-populated fields never take input; collection
    /// and reverse relations are applied as side-effects after the save.
    fn materialize(&self, app: &App, model: &Model, instance: &mut Instance, cleaned: &CleanedInput) {
        for field in &model.fields {
            if !field.editable || field.is_auto() || field.is_reverse_relation() {
                continue;
            }

            let Some(value) = cleaned.get(&field.name) else {
                continue;
            };

            match value {
                // Applied via set_relation once the instance has a key
                Cleaned::Nodes(_) => {}

                Cleaned::Node(node) => {
                    let target_model = app.model(node.model());
                    let key = node
                        .primary_key(target_model)
                        .cloned()
                        .unwrap_or(Value::Null);
                    instance.set(&field.name, key);
                }

                Cleaned::Upload(upload) => {
                    instance.set(&field.name, Value::from(upload.file_name.clone()));
                }

                Cleaned::Value(value) => {
                    let mut value = value.clone();
                    if value.is_null() && !field.nullable {
                        // An explicit null against a non-nullable field
                        // resets to the intrinsic default rather than
                        // writing null.
                        value = field.intrinsic_default();
                    }
                    instance.set(&field.name, value);
                }
            }
        }
    }

    async fn clean_instance(&self, app: &App, model: &Model, instance: &Instance) -> Result<()> {
        match app
            .driver()
            .full_clean(model, instance, &self.exclude_fields)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) => match err.as_validation() {
                // Some validation backends raise with an empty error set;
                // treat those as a no-op.
                Some(errors) if errors.is_empty() => Ok(()),
                _ => Err(err),
            },
        }
    }

    async fn save(
        &self,
        app: &App,
        request: &Request,
        model: &Model,
        instance: &mut Instance,
        cleaned: &CleanedInput,
    ) -> Result<()> {
        self.hooks.before_save(app, request, instance, cleaned).await?;

        app.driver().save(model, instance).await?;

        // Collection and reverse relation values apply as a set-style
        // replace now that the instance has a key.
        for field in &model.fields {
            if !field.is_relation() {
                continue;
            }
            if !(field.ty.is_collection() || field.is_reverse_relation()) {
                continue;
            }

            match cleaned.get(&field.name) {
                Some(Cleaned::Nodes(nodes)) => {
                    app.driver()
                        .set_relation(model, instance, &field.name, nodes)
                        .await?;
                }
                Some(Cleaned::Node(node)) => {
                    app.driver()
                        .set_relation(model, instance, &field.name, std::slice::from_ref(node))
                        .await?;
                }
                _ => {}
            }
        }

        self.hooks.after_save(app, request, instance, cleaned).await?;

        Ok(())
    }

    fn expected_type_for<'a>(&self, app: &'a App, model: &Model, field_name: &str) -> Option<&'a str> {
        let field = model.field_by_name(field_name)?;
        let target = field.ty.relation_target()?;
        app.type_for(target)
    }
}

fn id_str<'a>(field: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        Error::validation_field(field, format!("expected an id, got {}", value.type_name()))
    })
}

fn list_of_ids(field: &str, value: &Value) -> Result<Vec<String>> {
    let items = value.as_list().ok_or_else(|| {
        Error::validation_field(
            field,
            format!("expected a list of ids, got {}", value.type_name()),
        )
    })?;

    items
        .iter()
        .map(|item| id_str(field, item).map(str::to_string))
        .collect()
}
