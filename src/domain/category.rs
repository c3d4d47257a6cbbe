//! Budget category names and the per-category approved limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel category for uncategorized entries ("general"). Its spend is
/// tracked but never compared against a budget limit.
pub const GENERAL_CATEGORY: &str = "عام";

/// The maintenance category is evaluated on its own line but stays out of
/// the cross-category grand total.
pub const MAINTENANCE_CATEGORY: &str = "صيانة";

/// Fixed list of budget report line items, in report order.
pub const BUDGET_CATEGORIES: [&str; 12] = [
    "نفقات ذات طابع خاص",
    "تنقلات داخلية",
    "قرطاسية",
    "اتصالات",
    "مياه",
    "كهرباء",
    "أجور عمال",
    "إيجارات",
    "الورشات الثقافية",
    "صرف المواقع اليومية والمواجهة",
    "مواجهة الاعتماد الشهري",
    MAINTENANCE_CATEGORY,
];

/// Returns true when `name` is one of the fixed budget report categories.
pub fn is_budget_category(name: &str) -> bool {
    BUDGET_CATEGORIES.contains(&name)
}

/// Per-category approved spending limits, in minor units.
///
/// A category with no entry (or an explicit 0) has no budget configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetBook {
    #[serde(default)]
    limits: BTreeMap<String, i64>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_limit(&mut self, category: impl Into<String>, limit_minor: i64) {
        let category = category.into();
        if limit_minor <= 0 {
            self.limits.remove(&category);
        } else {
            self.limits.insert(category, limit_minor);
        }
    }

    pub fn limit_for(&self, category: &str) -> i64 {
        self.limits.get(category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
