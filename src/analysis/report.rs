use serde::Serialize;

/// Headline figures. Monetary values and percentages rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub revenue: f64,
    pub profit: f64,
    /// Profit as a percentage of revenue; 0 when there is no revenue.
    pub margin: f64,
    /// Mean month-over-month revenue change, in percent.
    pub growth: f64,
}

/// Parallel label/value vectors, ready for a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl Series {
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.data.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    /// Revenue per calendar month, labelled `YYYY-MM`, oldest first.
    pub revenue_trend: Series,
    pub profit_by_product: Series,
    pub cost_breakdown: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub kpis: Kpis,
    /// Absent when insights are switched off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Charts>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
