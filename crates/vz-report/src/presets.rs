//! Per-report presentation presets
//!
//! Reports are identified by [`ReportKind`]; everything shown for a report
//! (default chart, insight bullets, summary text) is looked up from it.

use serde::{Deserialize, Serialize};
use vz_core::ChartType;

/// Known reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    MonthlyRevenue,
    CategoryGrowth,
    ProductPerformance,
    EcommerceSales,
    Other,
}

/// Chart a report opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPreset {
    pub chart_type: ChartType,
    pub color_scheme: usize,
}

/// Headline figure shown next to a report chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetric {
    pub label: &'static str,
    pub value: String,
    pub change: &'static str,
}

/// Revenue per region behind the canvas charts
pub const REGION_REVENUE: [(&str, f64); 3] = [
    ("East", 6603.75),
    ("Central", 2975.73),
    ("West", 5760.62),
];

const DEFAULT_INSIGHTS: [&str; 3] = [
    "Data analysis shows positive trends",
    "Performance metrics exceeded targets",
    "Growth trajectory remains strong",
];

impl ReportKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Monthly Revenue Analysis" => ReportKind::MonthlyRevenue,
            "Category Growth Trends" => ReportKind::CategoryGrowth,
            "Product Performance Report" => ReportKind::ProductPerformance,
            "E-commerce Sales Data" => ReportKind::EcommerceSales,
            _ => ReportKind::Other,
        }
    }

    pub fn chart_preset(&self) -> ChartPreset {
        let (chart_type, color_scheme) = match self {
            ReportKind::MonthlyRevenue => (ChartType::Bar, 0),
            ReportKind::CategoryGrowth => (ChartType::Area, 2),
            ReportKind::ProductPerformance => (ChartType::Line, 5),
            ReportKind::EcommerceSales | ReportKind::Other => (ChartType::Bar, 0),
        };
        ChartPreset {
            chart_type,
            color_scheme,
        }
    }

    pub fn insights(&self) -> &'static [&'static str] {
        match self {
            ReportKind::MonthlyRevenue => &[
                "Revenue increased 15.3% compared to last quarter",
                "East region leads with 43% of total revenue",
                "Peak performance recorded in December at $6,604",
                "All regions showing positive growth trends",
            ],
            ReportKind::CategoryGrowth => &[
                "Electronics category dominates with 61% market share",
                "Furniture segment shows steady 12% growth",
                "West region outperformed expectations by 23%",
                "Q4 2025 marks highest quarterly revenue to date",
            ],
            ReportKind::ProductPerformance => &[
                "Top 3 products account for 67% of total sales",
                "Customer retention rate improved to 89%",
                "Average order value increased by $47",
                "Product line expansion shows 34% revenue uplift",
            ],
            ReportKind::EcommerceSales => &[
                "Total sales reached $15,340 this quarter",
                "Average transaction value: $127.50",
                "Peak sales day: December 15th ($2,340)",
                "Mobile conversions up 28% year-over-year",
            ],
            ReportKind::Other => &DEFAULT_INSIGHTS,
        }
    }

    pub fn summary(&self) -> Option<&'static str> {
        match self {
            ReportKind::MonthlyRevenue => Some(
                "Q4 2025 revenue performance exceeded projections with strong growth across all regions. \
                 The East region continues to be the primary revenue driver, while Central and West regions \
                 show promising upward momentum.",
            ),
            ReportKind::CategoryGrowth => Some(
                "Product categories demonstrate robust growth with Electronics maintaining market leadership. \
                 Strategic expansion in the Furniture segment shows excellent potential for continued revenue \
                 diversification.",
            ),
            ReportKind::ProductPerformance => Some(
                "Product line performance indicates healthy portfolio balance with top performers driving \
                 substantial revenue while newer products gain market traction. Customer metrics suggest high \
                 satisfaction and repeat purchase rates.",
            ),
            ReportKind::EcommerceSales => Some(
                "E-commerce operations show exceptional performance with increasing average order values and \
                 improving conversion rates. Mobile platform optimization resulted in significant traffic and \
                 sales uplift.",
            ),
            ReportKind::Other => None,
        }
    }
}

/// Total, average and peak of the regional revenue
pub fn key_metrics() -> Vec<KeyMetric> {
    let values: Vec<f64> = REGION_REVENUE.iter().map(|(_, v)| *v).collect();
    let total: f64 = values.iter().sum();
    let average = total / values.len() as f64;
    let peak = values.iter().copied().fold(f64::MIN, f64::max);

    vec![
        KeyMetric {
            label: "Total",
            value: format_dollars(total),
            change: "+15%",
        },
        KeyMetric {
            label: "Average",
            value: format_dollars(average),
            change: "+8%",
        },
        KeyMetric {
            label: "Peak",
            value: format_dollars(peak),
            change: "+23%",
        },
    ]
}

/// Whole dollars with thousands separators
pub fn format_dollars(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
