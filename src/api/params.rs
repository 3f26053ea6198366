use std::collections::BTreeMap;

/// Request parameters keyed by name.
///
/// A `BTreeMap` keeps query and form serialization order deterministic,
/// which also keeps outgoing URLs stable across calls.
pub type Params = BTreeMap<String, String>;

/// Builds a parameter map from string pairs.
pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Merges call-site parameters with the client's stored parameters.
///
/// Stored parameters win on key collision. This order is part of the
/// client contract: credentials configured at construction cannot be
/// overridden per call.
pub fn merge(call: &Params, stored: &Params) -> Params {
    let mut merged = call.clone();
    for (key, value) in stored {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
