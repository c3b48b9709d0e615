//! Folds multi-currency records into per-currency totals, a single
//! pivot-normalized total, and a month/category breakdown.

use crate::cache::RateCache;
use crate::core::record::{Record, RecordKind};
use crate::core::snapshot::RateSnapshot;
use crate::record_store::RecordStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-category totals within one month, with the records that produced
/// them in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub name: String,
    pub income: f64,
    pub expense: f64,
    pub records: Vec<Record>,
}

/// One month of activity. `key` is `"{month}.{year}"` with no zero
/// padding, e.g. `3.2023`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBreakdown {
    pub key: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub categories: Vec<CategoryBreakdown>,
}

/// Groups records of `kind` by currency code and sums their amounts.
/// Records whose stored amount fails to parse are skipped so one bad row
/// never aborts the whole batch.
pub fn sum_by_currency(records: &[Record], kind: RecordKind) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for record in records.iter().filter(|r| r.kind == kind) {
        match record.amount_value() {
            Ok(amount) => {
                *totals.entry(record.currency.clone()).or_insert(0.0) += amount;
            }
            Err(e) => warn!("Skipping malformed record: {}", e),
        }
    }
    totals
}

/// Collapses per-currency totals into a single amount in `pivot`.
///
/// Rates are units per one unit of the pivot currency, so non-pivot
/// amounts divide by their rate. A currency missing from the snapshot
/// (or carrying a non-positive rate) contributes zero rather than
/// failing the total; one minor currency without a rate should not
/// block the user's overall number.
pub fn normalize_to_pivot(
    totals: &HashMap<String, f64>,
    snapshot: &RateSnapshot,
    pivot: &str,
) -> f64 {
    let mut normalized = 0.0;
    for (currency, amount) in totals {
        if currency == pivot {
            normalized += amount;
            continue;
        }
        match snapshot.rate_for(currency) {
            Some(rate) if rate > 0.0 => normalized += amount / rate,
            Some(rate) => warn!("Unusable rate {} for {}, contributing zero", rate, currency),
            None => warn!("No rate for {}, contributing zero", currency),
        }
    }
    normalized
}

/// Folds records into the month -> category -> {income, expense, records}
/// view. Months come out most recent first, categories sorted by name,
/// record lists in input order. Records without a category land under
/// `Unspecified`.
pub fn aggregate_by_month_and_category(records: &[Record]) -> Vec<MonthBreakdown> {
    use chrono::Datelike;

    struct CategoryAcc {
        income: f64,
        expense: f64,
        records: Vec<Record>,
    }

    struct MonthAcc {
        income: f64,
        expense: f64,
        categories: HashMap<String, CategoryAcc>,
    }

    let mut months: HashMap<(i32, u32), MonthAcc> = HashMap::new();

    for record in records {
        let amount = match record.amount_value() {
            Ok(amount) => amount,
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                continue;
            }
        };

        let key = (record.timestamp.year(), record.timestamp.month());
        let month = months.entry(key).or_insert_with(|| MonthAcc {
            income: 0.0,
            expense: 0.0,
            categories: HashMap::new(),
        });
        let category = month
            .categories
            .entry(record.category_or_default().to_string())
            .or_insert_with(|| CategoryAcc {
                income: 0.0,
                expense: 0.0,
                records: Vec::new(),
            });

        match record.kind {
            RecordKind::Income => {
                month.income += amount;
                category.income += amount;
            }
            RecordKind::Expense => {
                month.expense += amount;
                category.expense += amount;
            }
        }
        category.records.push(record.clone());
    }

    let mut result: Vec<MonthBreakdown> = months
        .into_iter()
        .map(|((year, month), acc)| {
            let mut categories: Vec<CategoryBreakdown> = acc
                .categories
                .into_iter()
                .map(|(name, cat)| CategoryBreakdown {
                    name,
                    income: cat.income,
                    expense: cat.expense,
                    records: cat.records,
                })
                .collect();
            categories.sort_by(|a, b| a.name.cmp(&b.name));

            MonthBreakdown {
                key: format!("{month}.{year}"),
                year,
                month,
                income: acc.income,
                expense: acc.expense,
                categories,
            }
        })
        .collect();
    result.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    result
}

/// Composition layer the UI talks to: record store + rate cache wired to
/// a fixed pivot currency.
pub struct AggregationEngine {
    records: Arc<dyn RecordStore>,
    rates: Arc<RateCache>,
    pivot: String,
}

impl AggregationEngine {
    pub fn new(records: Arc<dyn RecordStore>, rates: Arc<RateCache>, pivot: &str) -> Self {
        Self {
            records,
            rates,
            pivot: pivot.to_string(),
        }
    }

    pub fn pivot(&self) -> &str {
        &self.pivot
    }

    /// Per-currency totals of the owner's records of the given kind.
    pub async fn totals_by_currency(
        &self,
        owner_id: &str,
        kind: RecordKind,
    ) -> Result<HashMap<String, f64>> {
        let records = self.records.find_records(owner_id, Some(kind)).await?;
        Ok(sum_by_currency(&records, kind))
    }

    /// The owner's total expense, normalized to the pivot currency using
    /// a currently-valid snapshot.
    pub async fn total_expense_in_pivot(&self, owner_id: &str) -> Result<f64> {
        let records = self
            .records
            .find_records(owner_id, Some(RecordKind::Expense))
            .await?;
        let totals = sum_by_currency(&records, RecordKind::Expense);

        let mut required: Vec<String> = totals
            .keys()
            .filter(|c| *c != &self.pivot)
            .cloned()
            .collect();
        required.sort();
        debug!("Normalizing expense totals for currencies: {:?}", required);

        let snapshot = self.rates.current_snapshot(&required).await?;
        Ok(normalize_to_pivot(&totals, &snapshot, &self.pivot))
    }

    /// The owner's full month/category breakdown across both kinds.
    pub async fn monthly_breakdown(&self, owner_id: &str) -> Result<Vec<MonthBreakdown>> {
        let records = self.records.find_records(owner_id, None).await?;
        Ok(aggregate_by_month_and_category(&records))
    }
}
