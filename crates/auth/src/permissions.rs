//! Effective-permission aggregation.

use std::collections::HashSet;

use keystone_core::{Group, PermissionId};

/// Reduce a list of groups to the deduplicated union of their permission
/// identifiers.
///
/// Pure and total: empty input yields empty output. Groups are walked in
/// input order and each group's permissions in their own order; the first
/// occurrence of an identifier wins, so output order is stable (but not
/// significant for correctness). Groups may freely share permissions —
/// no per-group dedup is assumed.
pub fn aggregate_permissions(groups: &[Group]) -> Vec<PermissionId> {
    let mut seen: HashSet<PermissionId> = HashSet::new();
    let mut effective = Vec::new();

    for group in groups {
        for &perm in &group.permissions {
            if seen.insert(perm) {
                effective.push(perm);
            }
        }
    }

    effective
}
