//! Sales-sheet analysis behind the dashboard.
//!
//! Input is a CSV with the columns `date`, `revenue`, `cost`, `product` and
//! `category` (extra columns are ignored). Rows with any of those fields empty
//! are dropped before aggregation.

pub mod report;

pub use report::{AnalysisReport, Charts, Kpis, Series};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::GatehouseError;
use report::round2;

pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "revenue", "cost", "product", "category"];

#[derive(Debug, Deserialize)]
struct RawRow {
    date: Option<String>,
    revenue: Option<f64>,
    cost: Option<f64>,
    product: Option<String>,
    category: Option<String>,
}

struct SaleRow {
    date: String,
    revenue: f64,
    cost: f64,
    product: String,
    category: String,
}

impl RawRow {
    fn complete(self) -> Option<SaleRow> {
        Some(SaleRow {
            date: self.date.filter(|s| !s.is_empty())?,
            revenue: self.revenue?,
            cost: self.cost?,
            product: self.product.filter(|s| !s.is_empty())?,
            category: self.category.filter(|s| !s.is_empty())?,
        })
    }
}

/// Analyze a `.csv` file on disk.
pub fn analyze_file(path: &Path) -> Result<AnalysisReport, GatehouseError> {
    let is_csv = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(GatehouseError::UnsupportedFormat(path.display().to_string()));
    }
    let file = File::open(path)?;
    analyze_reader(file)
}

pub fn analyze_reader<R: Read>(reader: R) -> Result<AnalysisReport, GatehouseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(GatehouseError::MissingColumn(*missing));
    }

    let mut revenue = 0.0;
    let mut cost = 0.0;
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_product: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut dropped = 0usize;

    for (idx, record) in rdr.deserialize::<RawRow>().enumerate() {
        let Some(row) = record?.complete() else {
            dropped += 1;
            continue;
        };
        // Line 1 is the header.
        let Some(date) = parse_date(&row.date) else {
            return Err(GatehouseError::InvalidDate {
                row: idx + 2,
                value: row.date,
            });
        };

        revenue += row.revenue;
        cost += row.cost;
        *monthly.entry(date.format("%Y-%m").to_string()).or_default() += row.revenue;
        let product = by_product.entry(row.product).or_default();
        product.0 += row.revenue;
        product.1 += row.cost;
        *by_category.entry(row.category).or_default() += row.cost;
    }
    debug!(dropped, months = monthly.len(), "sales rows aggregated");

    let profit = revenue - cost;
    let margin = if revenue != 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    };

    let mut revenue_trend = Series::default();
    for (month, total) in &monthly {
        revenue_trend.push(month.as_str(), *total);
    }
    let growth = mean_growth(&revenue_trend.data);

    let mut profit_by_product = Series::default();
    for (name, (rev, cst)) in by_product {
        profit_by_product.push(name, rev - cst);
    }

    let mut cost_breakdown = Series::default();
    for (name, total) in by_category {
        cost_breakdown.push(name, total);
    }

    Ok(AnalysisReport {
        kpis: Kpis {
            revenue: round2(revenue),
            profit: round2(profit),
            margin: round2(margin),
            growth: round2(growth),
        },
        charts: Some(Charts {
            revenue_trend,
            profit_by_product,
            cost_breakdown,
        }),
    })
}

/// Mean of the month-over-month percentage changes.
/// Changes from a zero month are undefined and skipped; with none left the result is 0.
fn mean_growth(monthly: &[f64]) -> f64 {
    let changes: Vec<f64> = monthly
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if changes.is_empty() {
        return 0.0;
    }
    changes.iter().sum::<f64>() / changes.len() as f64 * 100.0
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
