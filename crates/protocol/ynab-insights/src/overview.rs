//! Month budget overview: budgeted versus actual per category.

use std::collections::HashMap;

use serde::Serialize;
use ynab_types::{BudgetMonth, Category, CategoryGroup, Milliunits};

/// Figures for one category in the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOverview {
    pub category_id: String,
    pub category_name: String,
    #[serde(serialize_with = "crate::units::serialize")]
    pub budgeted: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub activity: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub available: Milliunits,
    /// Present only for a positive goal target.
    #[serde(serialize_with = "crate::units::serialize_option")]
    pub goal_target: Option<Milliunits>,
    pub goal_type: Option<String>,
}

/// A group with its visible categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOverview {
    pub category_group_id: String,
    pub category_group_name: String,
    pub categories: Vec<CategoryOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetOverview {
    /// `YYYY-MM`
    pub month: String,
    pub category_groups: Vec<GroupOverview>,
    #[serde(serialize_with = "crate::units::serialize")]
    pub to_be_budgeted: Milliunits,
    pub age_of_money: Option<u32>,
}

/// Combine the category structure with one month's figures.
///
/// `groups` supplies the layout and the hidden/deleted flags; `month`
/// supplies the figures. A category missing from the month keeps the figures
/// it was listed with. Hidden or deleted groups and categories are skipped,
/// as are groups left with no categories.
pub fn budget_overview(groups: &[CategoryGroup], month: &BudgetMonth) -> BudgetOverview {
    let figures: HashMap<&str, &Category> = month
        .categories
        .iter()
        .filter(|c| !c.deleted)
        .map(|c| (c.id.as_str(), c))
        .collect();

    let category_groups = groups
        .iter()
        .filter(|g| g.is_active())
        .filter_map(|group| {
            let categories: Vec<CategoryOverview> = group
                .active_categories()
                .map(|cat| {
                    let source = figures.get(cat.id.as_str()).copied().unwrap_or(cat);
                    CategoryOverview {
                        category_id: cat.id.clone(),
                        category_name: cat.name.clone(),
                        budgeted: source.budgeted,
                        activity: source.activity,
                        available: source.balance,
                        goal_target: source.goal_target.filter(|t| *t > 0),
                        goal_type: source.goal_type.clone().filter(|t| !t.is_empty()),
                    }
                })
                .collect();
            if categories.is_empty() {
                return None;
            }
            Some(GroupOverview {
                category_group_id: group.id.clone(),
                category_group_name: group.name.clone(),
                categories,
            })
        })
        .collect();

    BudgetOverview {
        month: month.month.chars().take(7).collect(),
        category_groups,
        to_be_budgeted: month.to_be_budgeted,
        age_of_money: month.age_of_money,
    }
}
