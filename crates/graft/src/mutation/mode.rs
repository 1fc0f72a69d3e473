/// What a declared mutation does to its target model.
///
/// The mode is pure field policy plus a persist strategy; there is no
/// type-level hierarchy between the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Insert a new instance. The identifier input is force-excluded.
    Create,

    /// Mutate an existing instance. The identifier input comes first and
    /// is required.
    Update,

    /// Create or update, decided by identifier presence in the input.
    Save,

    /// Delete the instance selected by the identifier.
    Delete,

    /// Identifier-only mutation; the operation itself is supplied through
    /// hooks.
    Operation,
}

impl MutationMode {
    /// True for modes that materialize input onto an instance and save it.
    pub fn persists(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Save)
    }

    /// True for modes whose input reduces to the identifier alone.
    pub(crate) fn id_only(self) -> bool {
        matches!(self, Self::Delete | Self::Operation)
    }

    pub(crate) fn type_suffix(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Save => "",
            Self::Delete => "Delete",
            Self::Operation => "Operation",
        }
    }
}
