//! Dotted-path lookup into a configuration tree.

use serde_json::Value;

/// Walk `tree` along the `.`-separated components of `offset`.
///
/// An empty offset addresses the whole tree. Array elements are addressed by
/// index. Any missing component yields `None`.
pub fn resolve_offset<'a>(tree: &'a Value, offset: &str) -> Option<&'a Value> {
    if offset.is_empty() {
        return Some(tree);
    }
    offset.split('.').try_fold(tree, |node, component| match node {
        Value::Object(map) => map.get(component),
        Value::Array(items) => component.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
