//! Budget categories and their groups.

use serde::{Deserialize, Serialize};

use crate::Milliunits;

/// A budget category with its figures for the current (or requested) month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub category_group_id: String,
    #[serde(default)]
    pub category_group_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub budgeted: Milliunits,
    #[serde(default)]
    pub activity: Milliunits,
    /// Available amount.
    #[serde(default)]
    pub balance: Milliunits,
    #[serde(default)]
    pub goal_type: Option<String>,
    #[serde(default)]
    pub goal_target: Option<Milliunits>,
    #[serde(default)]
    pub goal_target_month: Option<String>,
    #[serde(default)]
    pub goal_percentage_complete: Option<u32>,
    #[serde(default)]
    pub goal_under_funded: Option<Milliunits>,
    #[serde(default)]
    pub deleted: bool,
}

impl Category {
    /// Visible and not deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.hidden
    }

    /// True when more was spent than was available.
    pub fn is_overspent(&self) -> bool {
        self.balance < 0
    }
}

/// A named group of categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    /// Visible and not deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.hidden
    }

    /// Categories that are visible and not deleted.
    pub fn active_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_categories_skip_hidden_and_deleted() {
        let group = CategoryGroup {
            id: "g1".into(),
            name: "Bills".into(),
            categories: vec![
                Category {
                    id: "c1".into(),
                    name: "Rent".into(),
                    ..Default::default()
                },
                Category {
                    id: "c2".into(),
                    name: "Old".into(),
                    deleted: true,
                    ..Default::default()
                },
                Category {
                    id: "c3".into(),
                    name: "Hidden".into(),
                    hidden: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let ids: Vec<&str> = group.active_categories().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }
}
