//! Duplicate parameter name detection.

use crate::outcome::{DUPLICATED_PARAMETER, Warnings};
use crate::types::ToolParameter;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Report every parameter name that occurs more than once.
///
/// Each duplicate writes the same warnings key, so the last reported name
/// wins, across the whole document. Returns the duplicated names in order of
/// first appearance.
pub fn detect_duplicates(
    operation_id: &str,
    parameters: &[ToolParameter],
    warnings: &mut Warnings,
) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for parameter in parameters {
        *counts.entry(parameter.name.as_str()).or_default() += 1;
    }

    let mut reported = HashSet::new();
    parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .filter(|name| counts[name] > 1 && reported.insert(*name))
        .map(|name| {
            let count = counts[name];
            warn!("Operation {} declares parameter {} {} times", operation_id, name, count);
            warnings.insert(DUPLICATED_PARAMETER, format!("Parameter {} is duplicated.", name));
            name.to_string()
        })
        .collect()
}
