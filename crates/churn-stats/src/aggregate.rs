//! Grouped churn counts
//!
//! Counts customers per (category value, churn label) and adds a synthetic
//! `Total` row per value. Rows are ordered by churn category first
//! (Total, No, Yes) and by the category value second, so bar charts always
//! draw groups in the same order.

use std::collections::BTreeMap;

use churn_io::{ChurnLabel, CustomerTable};
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Churn category used for display grouping
///
/// The variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChurnCategory {
    /// Both labels together
    Total,
    /// Retained customers ("No")
    Retained,
    /// Churned customers ("Yes")
    Churned,
}

impl ChurnCategory {
    /// Categories in display order
    pub const DISPLAY_ORDER: [ChurnCategory; 3] = [
        ChurnCategory::Total,
        ChurnCategory::Retained,
        ChurnCategory::Churned,
    ];

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            ChurnCategory::Total => "Total",
            ChurnCategory::Retained => ChurnLabel::Retained.as_str(),
            ChurnCategory::Churned => ChurnLabel::Churned.as_str(),
        }
    }
}

impl From<ChurnLabel> for ChurnCategory {
    fn from(label: ChurnLabel) -> Self {
        match label {
            ChurnLabel::Retained => ChurnCategory::Retained,
            ChurnLabel::Churned => ChurnCategory::Churned,
        }
    }
}

/// One aggregated row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedCount {
    /// Value of the grouped column
    pub group: String,
    /// Churn category
    pub category: ChurnCategory,
    /// Number of customers
    pub count: usize,
}

/// Grouped counts for one categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedCounts {
    /// Column that was grouped
    pub column: String,
    /// Rows in display order
    pub rows: Vec<AggregatedCount>,
}

impl GroupedCounts {
    /// Rows of one churn category, in value order
    pub fn series(&self, category: ChurnCategory) -> impl Iterator<Item = &AggregatedCount> {
        self.rows.iter().filter(move |r| r.category == category)
    }

    /// Count for a (value, category) pair; zero if absent
    pub fn count(&self, group: &str, category: ChurnCategory) -> usize {
        self.rows
            .iter()
            .find(|r| r.group == group && r.category == category)
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// Distinct values of the grouped column, in natural order
    pub fn groups(&self) -> Vec<&str> {
        self.series(ChurnCategory::Total)
            .map(|r| r.group.as_str())
            .collect()
    }
}

/// Count customers per (value of `column`, churn label), plus totals
///
/// Combinations with no customers are omitted; every value that occurs at
/// all has a `Total` row.
pub fn group_by_category_and_churn(
    table: &CustomerTable,
    column: &str,
) -> StatsResult<GroupedCounts> {
    if table.categorical_index(column).is_none() {
        return Err(StatsError::UnknownColumn(column.to_string()));
    }

    // value -> [retained, churned]
    let mut counts: BTreeMap<&str, [usize; 2]> = BTreeMap::new();
    for record in table.records() {
        let value = table.category_value(record, column).unwrap_or_default();
        let slot = counts.entry(value).or_default();
        match record.churn {
            ChurnLabel::Retained => slot[0] += 1,
            ChurnLabel::Churned => slot[1] += 1,
        }
    }

    let mut rows = Vec::with_capacity(counts.len() * 3);
    for category in ChurnCategory::DISPLAY_ORDER {
        for (&value, &[retained, churned]) in &counts {
            let count = match category {
                ChurnCategory::Total => retained + churned,
                ChurnCategory::Retained => retained,
                ChurnCategory::Churned => churned,
            };
            if count == 0 && category != ChurnCategory::Total {
                continue;
            }
            rows.push(AggregatedCount {
                group: value.to_string(),
                category,
                count,
            });
        }
    }

    Ok(GroupedCounts {
        column: column.to_string(),
        rows,
    })
}

/// Customers per churn label, largest share first
pub fn churn_counts(table: &CustomerTable) -> Vec<(ChurnLabel, usize)> {
    let retained = table.with_churn(ChurnLabel::Retained).count();
    let churned = table.len() - retained;

    let mut counts = vec![
        (ChurnLabel::Retained, retained),
        (ChurnLabel::Churned, churned),
    ];
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}
