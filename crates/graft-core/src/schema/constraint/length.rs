use super::Constraint;

#[derive(Debug, Clone)]
pub struct ConstraintLength {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl From<ConstraintLength> for Constraint {
    fn from(value: ConstraintLength) -> Self {
        Constraint::Length(value)
    }
}
