use serde::Serialize;

use super::Margin;
use crate::data::model::MeasurementRecord;

/// Number of leading OTUs shown in the bar chart.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    /// Counts, smallest of the top entries first.
    pub x: Vec<f64>,
    /// `"OTU <id>"` tick labels, aligned with `x`.
    pub y: Vec<String>,
    /// Hover text.
    pub text: Vec<String>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub orientation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub title: String,
    pub margin: Margin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub trace: BarTrace,
    pub layout: BarLayout,
}

/// Horizontal bar chart of the first [`TOP_N`] OTUs in stored order.
///
/// The record is assumed to be sorted by descending abundance already; the
/// slice is reversed so the most abundant OTU ends up as the top bar.
pub fn build_bar_chart(record: &MeasurementRecord) -> BarChartSpec {
    let n = record.len().min(TOP_N);

    let x = record.sample_values[..n].iter().rev().copied().collect();
    let y = record.otu_ids[..n]
        .iter()
        .rev()
        .map(|id| format!("OTU {id}"))
        .collect();
    let text = record.otu_labels[..n].iter().rev().cloned().collect();

    BarChartSpec {
        trace: BarTrace {
            x,
            y,
            text,
            kind: "bar",
            orientation: "h",
        },
        layout: BarLayout {
            title: "Most Frequently Observed OTUs".to_string(),
            margin: Margin {
                t: Some(40),
                l: Some(110),
            },
        },
    }
}
