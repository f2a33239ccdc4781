//! Category and month endpoints.

use ynab_types::{BudgetMonth, Category, CategoryGroup};

use crate::client::YnabClient;
use crate::envelope::{CategoriesData, CategoryData, MonthData};
use crate::error::{ClientError, ClientResult};

impl YnabClient {
    /// Category groups with their categories, figures for the current month.
    pub async fn list_categories(&self, budget_id: &str) -> ClientResult<Vec<CategoryGroup>> {
        let data: CategoriesData = self
            .get(&["budgets", budget_id, "categories"], &[])
            .await?;
        Ok(data.category_groups)
    }

    /// Find one category by ID across all groups.
    pub async fn get_category(&self, budget_id: &str, category_id: &str) -> ClientResult<Category> {
        self.list_categories(budget_id)
            .await?
            .into_iter()
            .flat_map(|group| group.categories)
            .find(|c| c.id == category_id)
            .ok_or_else(|| ClientError::not_found("category", category_id))
    }

    /// A category's figures for a specific month (`YYYY-MM-DD` or `current`).
    pub async fn get_month_category(
        &self,
        budget_id: &str,
        month: &str,
        category_id: &str,
    ) -> ClientResult<Category> {
        let data: CategoryData = self
            .get(
                &["budgets", budget_id, "months", month, "categories", category_id],
                &[],
            )
            .await?;
        Ok(data.category)
    }

    /// Budget month detail (`YYYY-MM-DD` or `current`).
    pub async fn get_month(&self, budget_id: &str, month: &str) -> ClientResult<BudgetMonth> {
        let data: MonthData = self
            .get(&["budgets", budget_id, "months", month], &[])
            .await?;
        Ok(data.month)
    }
}
