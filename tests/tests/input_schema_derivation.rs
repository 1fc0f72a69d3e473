//! Input field derivation and schema fragment mapping for declared
//! mutations.

use tests::*;

use graft::{App, Config, FieldKind, InputTy, Mutation, MutationMode};

use std::sync::Arc;

#[test]
fn save_mutation_derives_fields_in_declaration_order() {
    let env = setup();
    let mutation = Mutation::builder(PROJECT).build(&env.app).unwrap();

    let names: Vec<&str> = mutation.input_fields().keys().map(String::as_str).collect();
    assert_eq!(
        names,
        [
            "id",
            "title",
            "description",
            "status",
            "due_date",
            "cost",
            "attachment",
            "parent",
            "tags",
        ]
    );

    let fields = mutation.input_fields();

    // Reverse relations and audit timestamps never derive
    assert!(!fields.contains_key("milestones"));
    assert!(!fields.contains_key("created_at"));
    assert!(!fields.contains_key("updated_at"));

    assert_eq!(fields["id"].ty, InputTy::Id);
    assert_eq!(fields["parent"].ty, InputTy::Id);
    assert_eq!(fields["tags"].ty, InputTy::IdList);
    assert_eq!(fields["attachment"].ty, InputTy::Upload);
    assert_eq!(fields["title"].ty, InputTy::Value);

    // Save mode leaves the identifier optional: presence decides
    // create-or-update
    assert!(!fields["id"].required);
    assert!(fields["title"].required);
    assert!(!fields["description"].required);
    assert!(!fields["status"].required);
    assert!(!fields["due_date"].required);
    // A nullable relation is never required by inference
    assert!(!fields["parent"].required);
}

#[test]
fn create_mutation_force_excludes_the_identifier() {
    let env = setup();
    let mutation = Mutation::builder(PROJECT)
        .mode(MutationMode::Create)
        .build(&env.app)
        .unwrap();

    assert!(!mutation.input_fields().contains_key("id"));
    assert_eq!(mutation.input_type_name(), "ProjectCreateInput");
    assert_eq!(mutation.return_field_name(), "project");
}

#[test]
fn update_with_only_fields_round_trip() {
    let env = setup();
    let mutation = Mutation::builder(PROJECT)
        .mode(MutationMode::Update)
        .only_fields(["id", "title"])
        .build(&env.app)
        .unwrap();

    let names: Vec<&str> = mutation.input_fields().keys().map(String::as_str).collect();
    assert_eq!(names, ["id", "title"]);

    let fields = mutation.input_fields();
    assert!(fields["id"].required);
    // title disallows blank and has no default, so inference keeps it
    // required
    assert!(fields["title"].required);
}

#[test]
fn explicit_required_fields_override_inference() {
    let env = setup();
    let mutation = Mutation::builder(MILESTONE)
        .required_fields(["name"])
        .build(&env.app)
        .unwrap();

    let fields = mutation.input_fields();
    assert!(fields["name"].required);
    // Non-nullable relation with no default, but the explicit list wins
    assert!(!fields["project"].required);
    assert!(!fields["id"].required);
}

#[test]
fn relation_required_follows_nullability() {
    let env = setup();
    let mutation = Mutation::builder(MILESTONE).build(&env.app).unwrap();

    let fields = mutation.input_fields();
    assert!(fields["project"].required);
    assert_eq!(fields["project"].ty, InputTy::Id);
    assert_eq!(fields["project"].schema.of_type.as_deref(), Some("ProjectType"));
}

#[test]
fn reverse_relations_appear_when_configured() {
    let env = setup_with(Config {
        include_reverse_relations: true,
        ..Config::default()
    });
    let mutation = Mutation::builder(PROJECT).build(&env.app).unwrap();

    let field = &mutation.input_fields()["milestones"];
    assert_eq!(field.ty, InputTy::IdList);
    assert_eq!(field.schema.kind, FieldKind::Id);
    assert!(field.schema.multiple);
    assert_eq!(field.schema.of_type.as_deref(), Some("MilestoneType"));
}

#[test]
fn only_fields_whitelists_reverse_relations() {
    let env = setup();
    let mutation = Mutation::builder(PROJECT)
        .only_fields(["milestones"])
        .build(&env.app)
        .unwrap();

    assert!(mutation.input_fields().contains_key("milestones"));
}

#[test]
fn fragment_required_mirrors_input_required() {
    let env = setup();

    let mutations = [
        Mutation::builder(PROJECT).build(&env.app).unwrap(),
        Mutation::builder(PROJECT)
            .mode(MutationMode::Update)
            .build(&env.app)
            .unwrap(),
        Mutation::builder(MILESTONE)
            .required_fields(["name"])
            .build(&env.app)
            .unwrap(),
        Mutation::builder(PROJECT)
            .mode(MutationMode::Delete)
            .build(&env.app)
            .unwrap(),
    ];

    for mutation in &mutations {
        for field in mutation.input_fields().values() {
            assert_eq!(
                field.required, field.schema.validation.required,
                "required flag out of sync for `{}` in `{}`",
                field.name,
                mutation.input_type_name(),
            );
        }
    }
}

#[test]
fn schema_registry_exports_fragments() {
    let env = setup();
    Mutation::builder(PROJECT)
        .mode(MutationMode::Create)
        .build(&env.app)
        .unwrap();

    let schema = env.app.schema("ProjectCreateInput").unwrap();
    assert_eq!(schema.object_type, "ProjectCreateInput");

    let by_name = |name: &str| {
        schema
            .fields
            .iter()
            .find(|fragment| fragment.name == name)
            .unwrap()
    };

    // Names are camel cased for the public schema
    let due_date = by_name("dueDate");
    assert_eq!(due_date.kind, FieldKind::Date);

    let title = by_name("title");
    assert_eq!(title.kind, FieldKind::String);
    assert_eq!(title.validation.max_length, Some(255));

    let cost = by_name("cost");
    assert_eq!(cost.kind, FieldKind::Decimal);
    assert_eq!(cost.validation.max_digits, Some(10));
    assert_eq!(cost.validation.decimal_places, Some(2));

    let tags = by_name("tags");
    assert_eq!(tags.kind, FieldKind::Id);
    assert!(tags.multiple);
    assert_eq!(tags.of_type.as_deref(), Some("TagType"));

    let status = by_name("status");
    assert_eq!(status.default_value, Some(serde_json::json!("open")));
}

#[test]
fn unmappable_field_kind_fails_declaration() {
    let env = setup();
    let err = Mutation::builder(ARTIFACT).build(&env.app).unwrap_err();
    assert!(err.is_schema_mapping());
    assert!(err.to_string().contains("payload"));
}

#[test]
fn unresolved_relation_target_yields_no_of_type() {
    // An app registering no type name for the tag model
    let driver = Arc::new(MemoryDriver::new());
    let resolver = Arc::new(MemoryResolver::new(&driver, [("ProjectType", PROJECT)]));

    let app = App::builder()
        .model(project_model())
        .model(tag_model())
        .type_name(PROJECT, "ProjectType")
        .driver(driver)
        .resolver(resolver)
        .build()
        .unwrap();

    let mutation = Mutation::builder(PROJECT)
        .mode(MutationMode::Create)
        .build(&app)
        .unwrap();

    assert_eq!(mutation.input_fields()["tags"].schema.of_type, None);
}

#[test]
fn delete_mutation_input_reduces_to_the_identifier() {
    let env = setup();
    let mutation = Mutation::builder(PROJECT)
        .mode(MutationMode::Delete)
        .build(&env.app)
        .unwrap();

    let names: Vec<&str> = mutation.input_fields().keys().map(String::as_str).collect();
    assert_eq!(names, ["id"]);
    assert!(mutation.input_fields()["id"].required);
    assert_eq!(mutation.input_type_name(), "ProjectDeleteInput");
}
