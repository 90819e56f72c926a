//! Summarises a user's transactions into totals and per-category breakdowns.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// Identifies one category breakdown: the category label and the type it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryKey {
    /// The category label of the transactions.
    pub category: String,
    /// The type of the transactions.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The sum and number of transactions for one category and type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    /// The category and type these totals are for.
    #[serde(rename = "_id")]
    pub key: CategoryKey,
    /// The sum of the transaction amounts.
    pub total: f64,
    /// The number of transactions.
    pub count: usize,
}

/// Income and expense totals with a per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// Totals per category and type, largest total first.
    pub category_stats: Vec<CategoryStat>,
}

/// Compute the statistics for `transactions`.
///
/// Category breakdowns with equal totals keep the order in which their first
/// transaction appears in `transactions`.
pub fn compute_statistics(transactions: &[Transaction]) -> StatisticsSnapshot {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut category_stats: Vec<CategoryStat> = Vec::new();
    let mut index_by_key: HashMap<CategoryKey, usize> = HashMap::new();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => income += transaction.amount,
            TransactionType::Expense => expense += transaction.amount,
        }

        let key = CategoryKey {
            category: transaction.category.clone(),
            transaction_type: transaction.transaction_type,
        };

        let index = *index_by_key.entry(key.clone()).or_insert_with(|| {
            category_stats.push(CategoryStat {
                key,
                total: 0.0,
                count: 0,
            });
            category_stats.len() - 1
        });

        let stat = &mut category_stats[index];
        stat.total += transaction.amount;
        stat.count += 1;
    }

    // `sort_by` is stable, so ties stay in first-seen order.
    category_stats.sort_by(|a, b| b.total.total_cmp(&a.total));

    StatisticsSnapshot {
        income,
        expense,
        balance: income - expense,
        category_stats,
    }
}
