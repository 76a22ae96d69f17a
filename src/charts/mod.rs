/// Render pipeline: one lookup per selection, fanned out into view-models.
///
/// ```text
///   Dataset + SampleId
///        │  metadata_for / sample_for
///        ▼
///   ┌──────────────────────────────────────────────┐
///   │ metadata listing │ bar │ bubble │ gauge       │
///   └──────────────────────────────────────────────┘
///        │
///        ▼
///   SampleViews  (drawn by ui::plot, exported as Plotly JSON)
/// ```
///
/// Every builder is a pure function of the immutable dataset, so selecting
/// the same sample twice yields identical views.

pub mod bar;
pub mod bubble;
pub mod gauge;
pub mod metadata;

use serde::Serialize;

use crate::data::model::{Dataset, LookupError, SampleId};

use bar::BarChartSpec;
use bubble::BubbleChartSpec;
use gauge::GaugeChartSpec;
use metadata::MetadataListing;

/// Layout margins in pixels; unset sides are omitted from the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
}

/// Axis settings shared by the chart layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
}

/// Everything drawn for one selected sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleViews {
    pub sample: SampleId,
    pub metadata: MetadataListing,
    pub bar: BarChartSpec,
    pub bubble: BubbleChartSpec,
    pub gauge: GaugeChartSpec,
}

/// Look up `id` once and derive all four views from the matched records.
pub fn build_sample_views(dataset: &Dataset, id: &SampleId) -> Result<SampleViews, LookupError> {
    let meta = dataset.metadata_for(id)?;
    let record = dataset.sample_for(id)?;

    log::debug!("building views for sample {id} ({} OTUs)", record.len());

    Ok(SampleViews {
        sample: id.clone(),
        metadata: metadata::build_metadata_listing(meta),
        bar: bar::build_bar_chart(record),
        bubble: bubble::build_bubble_chart(record),
        gauge: gauge::build_gauge_chart(meta),
    })
}
