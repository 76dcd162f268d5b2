//! Per-group email suffix policy

use std::collections::HashMap;

/// Decide whether an email address is acceptable for a group
///
/// A group with no configured allow-list, or an empty one, accepts any
/// address. Otherwise the address must end with at least one configured
/// suffix. Matching is case-sensitive against the full address, so
/// `@example.com` pins the exact domain while `.edu.au` admits every
/// domain under it.
pub fn is_allowed(group_id: &str, email: &str, table: &HashMap<String, Vec<String>>) -> bool {
    match table.get(group_id) {
        Some(suffixes) if !suffixes.is_empty() => {
            suffixes.iter().any(|suffix| email.ends_with(suffix.as_str()))
        }
        _ => true,
    }
}
