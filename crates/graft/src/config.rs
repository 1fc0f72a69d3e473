/// Process-wide configuration, owned by [`App`](crate::App).
///
/// Read on every invocation, never mutated during request handling.
#[derive(Debug, Clone)]
pub struct Config {
    /// Expose reverse relations as mutation input even when a mutation does
    /// not whitelist them explicitly.
    pub include_reverse_relations: bool,

    /// Convert authorization failures raised by collaborators during
    /// persistence into a single generic payload error instead of
    /// re-raising them.
    pub swallow_permission_denied: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            include_reverse_relations: false,
            swallow_permission_denied: true,
        }
    }
}
