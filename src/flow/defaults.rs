use super::definition::NodeType;
use super::node_data::NodeData;
use rand::Rng;
use serde_json::{Map, Value};

/// Key under which the editor persists its working flow.
pub const STORAGE_KEY: &str = "jl-flowbuilder-state-v1";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `len` random lowercase base-36 characters.
pub(crate) fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Short random identifier such as `n_k3x9a0q`.
pub fn uid(prefix: &str) -> String {
    format!("{}_{}", prefix, random_base36(7))
}

/// The data mapping a new node of `kind` starts with.
pub fn default_node_data(kind: &NodeType) -> Map<String, Value> {
    NodeData::defaults(kind).into_map()
}
