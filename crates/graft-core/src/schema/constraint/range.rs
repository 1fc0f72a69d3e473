use super::Constraint;

#[derive(Debug, Clone)]
pub struct ConstraintRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl From<ConstraintRange> for Constraint {
    fn from(value: ConstraintRange) -> Self {
        Constraint::Range(value)
    }
}
