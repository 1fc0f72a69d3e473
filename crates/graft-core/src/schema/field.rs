use super::{BelongsTo, Constraint, ConstraintLength, ConstraintRange, HasMany, HasOne, ManyToMany, ManyToManyRev, ModelId};
use crate::Value;

use serde::Serialize;

/// Audit timestamp fields maintained by the persistence layer. They are
/// never exposed as mutation input.
pub const AUDIT_TIMESTAMP_FIELDS: &[&str] = &["created_at", "updated_at", "archived_at"];

/// Suffix marking synthetic internal fields that must stay off the API
/// surface.
pub const INTERNAL_FIELD_SUFFIX: &str = "+";

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, snake case, unique within the model
    pub name: String,

    /// Scalar, list, relation, ...
    pub ty: FieldTy,

    /// True if the stored value may be null
    pub nullable: bool,

    /// True if an empty submitted value is acceptable
    pub blank: bool,

    /// Intrinsic default applied when no value is provided
    pub default: Option<Value>,

    /// False for fields the API must never write (computed, denormalized)
    pub editable: bool,

    /// True if the field is the model's primary key
    pub primary_key: bool,

    /// Specified if and how the persistence layer populates this field for
    /// new rows
    pub auto: Option<AutoStrategy>,

    /// Any additional field constraints
    pub constraints: Vec<Constraint>,

    /// Enumerated values, when the field is choice-limited
    pub choices: Option<Vec<Choice>>,

    /// The field's humanized name
    pub label: Option<String>,

    /// Help text shown alongside generated form inputs
    pub help_text: Option<String>,
}

/// How the persistence layer populates an auto field for new rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStrategy {
    Id,
    Uuid,
    Increment,
}

/// One enumerated value of a choice-limited field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Scalar(ScalarKind),

    /// Array-like field; recurses into the element type
    List(Box<FieldTy>),

    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    ManyToMany(ManyToMany),
    ManyToManyRev(ManyToManyRev),
}

/// The closed set of persistence-layer scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Varchar,
    Text,
    Email,
    Slug,
    Phone,
    Password,
    Url,
    Uuid,
    Ip,
    File,
    Image,
    Bool,
    SmallInt,
    Int,
    BigInt,
    Float,
    Decimal { max_digits: u8, decimal_places: u8 },
    Date,
    DateTime,
    Time,
    Json,
    Blob,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldTy) -> Field {
        Field {
            name: name.into(),
            ty,
            nullable: false,
            blank: false,
            default: None,
            editable: true,
            primary_key: false,
            auto: None,
            constraints: vec![],
            choices: None,
            label: None,
            help_text: None,
        }
    }

    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Field {
        Field::new(name, FieldTy::Scalar(kind))
    }

    pub fn varchar(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Varchar)
    }

    pub fn text(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Text)
    }

    pub fn boolean(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Bool)
    }

    pub fn int(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Int)
    }

    pub fn big_int(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::BigInt)
    }

    pub fn float(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Float)
    }

    pub fn decimal(name: impl Into<String>, max_digits: u8, decimal_places: u8) -> Field {
        Field::scalar(
            name,
            ScalarKind::Decimal {
                max_digits,
                decimal_places,
            },
        )
    }

    pub fn date(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Date)
    }

    pub fn datetime(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::DateTime)
    }

    pub fn json(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::Json)
    }

    pub fn file(name: impl Into<String>) -> Field {
        Field::scalar(name, ScalarKind::File)
    }

    /// A primary key populated by the persistence layer.
    pub fn auto_key(name: impl Into<String>) -> Field {
        let mut field = Field::scalar(name, ScalarKind::BigInt);
        field.primary_key = true;
        field.blank = true;
        field.auto = Some(AutoStrategy::Increment);
        field
    }

    pub fn belongs_to(name: impl Into<String>, target: ModelId) -> Field {
        Field::new(name, FieldTy::BelongsTo(BelongsTo { target }))
    }

    pub fn has_one(name: impl Into<String>, target: ModelId) -> Field {
        Field::new(name, FieldTy::HasOne(HasOne { target }))
    }

    pub fn has_many(name: impl Into<String>, target: ModelId) -> Field {
        let mut field = Field::new(name, FieldTy::HasMany(HasMany { target }));
        field.nullable = true;
        field
    }

    pub fn many_to_many(name: impl Into<String>, target: ModelId) -> Field {
        let mut field = Field::new(name, FieldTy::ManyToMany(ManyToMany { target }));
        field.blank = true;
        field
    }

    pub fn many_to_many_rev(name: impl Into<String>, target: ModelId) -> Field {
        let mut field = Field::new(name, FieldTy::ManyToManyRev(ManyToManyRev { target }));
        field.nullable = true;
        field
    }

    // ------------------------------------------------------------------
    // Builder-style modifiers
    // ------------------------------------------------------------------

    pub fn nullable(mut self) -> Field {
        self.nullable = true;
        self
    }

    pub fn blank(mut self) -> Field {
        self.blank = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Field {
        self.default = Some(value.into());
        self
    }

    pub fn read_only(mut self) -> Field {
        self.editable = false;
        self
    }

    pub fn auto(mut self, strategy: AutoStrategy) -> Field {
        self.auto = Some(strategy);
        self
    }

    pub fn max_length(mut self, max: u64) -> Field {
        self.constraints.push(Constraint::length_less_than(max));
        self
    }

    pub fn min_length(mut self, min: u64) -> Field {
        self.constraints.push(Constraint::length_at_least(min));
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Field {
        self.constraints.push(ConstraintRange { min, max }.into());
        self
    }

    pub fn choices(mut self, choices: Vec<Choice>) -> Field {
        self.choices = Some(choices);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Field {
        self.label = Some(label.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Field {
        self.help_text = Some(help_text.into());
        self
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    pub fn is_reverse_relation(&self) -> bool {
        self.ty.is_reverse_relation()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The value substituted when an explicit null is submitted for a
    /// non-nullable field.
    pub fn intrinsic_default(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    /// True if the persistence layer populates this field itself.
    pub fn is_auto(&self) -> bool {
        self.auto.is_some()
    }

    /// True if the field is internal-only: synthetic accessor or audit
    /// timestamp.
    pub fn is_internal(&self) -> bool {
        self.name.ends_with(INTERNAL_FIELD_SUFFIX)
            || AUDIT_TIMESTAMP_FIELDS.contains(&self.name.as_str())
    }

    pub fn length_constraint(&self) -> Option<&ConstraintLength> {
        self.constraints.iter().find_map(Constraint::as_length)
    }

    pub fn range_constraint(&self) -> Option<&ConstraintRange> {
        self.constraints.iter().find_map(Constraint::as_range)
    }
}

impl FieldTy {
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::BelongsTo(..)
                | Self::HasOne(..)
                | Self::HasMany(..)
                | Self::ManyToMany(..)
                | Self::ManyToManyRev(..)
        )
    }

    /// True for relations implied by another model's key pointing back at
    /// this model.
    pub fn is_reverse_relation(&self) -> bool {
        matches!(
            self,
            Self::HasOne(..) | Self::HasMany(..) | Self::ManyToManyRev(..)
        )
    }

    /// True when the field holds multiple values.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::List(..) | Self::HasMany(..) | Self::ManyToMany(..) | Self::ManyToManyRev(..)
        )
    }

    /// If the field is a relation, the target model.
    pub fn relation_target(&self) -> Option<ModelId> {
        match self {
            Self::BelongsTo(rel) => Some(rel.target),
            Self::HasOne(rel) => Some(rel.target),
            Self::HasMany(rel) => Some(rel.target),
            Self::ManyToMany(rel) => Some(rel.target),
            Self::ManyToManyRev(rel) => Some(rel.target),
            Self::Scalar(..) | Self::List(..) => None,
        }
    }
}
