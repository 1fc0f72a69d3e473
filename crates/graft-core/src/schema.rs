mod constraint;
pub use constraint::{Constraint, ConstraintLength, ConstraintRange};

mod field;
pub use field::{
    AutoStrategy, Choice, Field, FieldTy, ScalarKind, AUDIT_TIMESTAMP_FIELDS,
    INTERNAL_FIELD_SUFFIX,
};

mod model;
pub use model::{Model, ModelId};

mod name;
pub use name::Name;

mod relation;
pub use relation::{BelongsTo, HasMany, HasOne, ManyToMany, ManyToManyRev};
