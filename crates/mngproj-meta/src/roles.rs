//! Role-priority table used to rank presets during resolution

use std::collections::BTreeMap;

/// Built-in role scores. Higher wins a conflicting script.
pub const DEFAULT_ROLE_PRIORITIES: [(&str, i64); 4] = [
    ("framework", 30),
    ("tool", 20),
    ("package_manager", 10),
    ("language", 0),
];

/// Immutable role → score lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePriorities {
    scores: BTreeMap<String, i64>,
}

impl Default for RolePriorities {
    fn default() -> Self {
        Self {
            scores: DEFAULT_ROLE_PRIORITIES
                .iter()
                .map(|(role, score)| (role.to_string(), *score))
                .collect(),
        }
    }
}

impl RolePriorities {
    /// Defaults overlaid entry by entry with a project's overrides.
    pub fn with_overrides(overrides: &BTreeMap<String, i64>) -> Self {
        let mut table = Self::default();
        for (role, score) in overrides {
            table.scores.insert(role.clone(), *score);
        }
        table
    }

    /// Score for a role; unknown roles score 0.
    pub fn score(&self, role: &str) -> i64 {
        self.scores.get(role).copied().unwrap_or(0)
    }
}
