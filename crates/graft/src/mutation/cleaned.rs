use graft_core::{Instance, Upload, Value};

use indexmap::IndexMap;

/// One fully resolved input value.
///
/// Scalars pass through; relation references come back as materialized
/// instances; upload tokens come back as file handles.
#[derive(Debug, Clone)]
pub enum Cleaned {
    Value(Value),
    Node(Instance),
    Nodes(Vec<Instance>),
    Upload(Upload),
}

/// The per-invocation mapping from input field name to resolved value.
///
/// Fields absent from the raw input are absent here too: "not supplied" is
/// distinct from "supplied as null". Built fresh per call and discarded
/// once the instance is saved.
pub type CleanedInput = IndexMap<String, Cleaned>;
