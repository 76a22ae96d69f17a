use serde::Serialize;

use super::Axis;
use crate::data::model::MeasurementRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMarker {
    /// Bubble diameters, one per OTU.
    pub size: Vec<f64>,
    /// Colour keys (OTU ids), mapped onto a continuous scale when drawn.
    pub color: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleTrace {
    pub x: Vec<u32>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub mode: &'static str,
    pub marker: BubbleMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleLayout {
    pub xaxis: Axis,
    pub hovermode: &'static str,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleChartSpec {
    pub trace: BubbleTrace,
    pub layout: BubbleLayout,
}

impl BubbleChartSpec {
    pub fn len(&self) -> usize {
        self.trace.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.x.is_empty()
    }
}

/// One bubble per OTU of the full record, no filtering.
pub fn build_bubble_chart(record: &MeasurementRecord) -> BubbleChartSpec {
    BubbleChartSpec {
        trace: BubbleTrace {
            x: record.otu_ids.clone(),
            y: record.sample_values.clone(),
            text: record.otu_labels.clone(),
            mode: "markers",
            marker: BubbleMarker {
                size: record.sample_values.clone(),
                color: record.otu_ids.clone(),
            },
        },
        layout: BubbleLayout {
            xaxis: Axis {
                title: Some("OTU ID".to_string()),
                ..Default::default()
            },
            hovermode: "closest",
            height: 600,
            width: 1200,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    #[test]
    fn arrays_span_the_full_record() {
        let rec = MeasurementRecord {
            id: "940".into(),
            otu_ids: (0..37).collect(),
            otu_labels: (0..37).map(|i| format!("taxon {i}")).collect(),
            sample_values: (0..37).map(|i| f64::from(i) * 2.0).collect(),
        };
        let spec = build_bubble_chart(&rec);
        assert_eq!(spec.len(), 37);
        assert_eq!(spec.trace.y.len(), 37);
        assert_eq!(spec.trace.text.len(), 37);
        assert_eq!(spec.trace.marker.size, spec.trace.y);
        assert_eq!(spec.trace.marker.color, spec.trace.x);
        assert_eq!(spec.trace.text[36], "taxon 36");
    }

    #[test]
    fn layout_matches_dashboard() {
        let rec = MeasurementRecord {
            id: "1".into(),
            otu_ids: vec![],
            otu_labels: vec![],
            sample_values: vec![],
        };
        let json = serde_json::to_value(build_bubble_chart(&rec)).unwrap();
        assert_eq!(json["layout"]["xaxis"]["title"], "OTU ID");
        assert_eq!(json["layout"]["hovermode"], "closest");
        assert!(json["layout"]["xaxis"].get("range").is_none());
    }

    proptest! {
        #![proptest_config(Config::with_cases(128))]
        #[test]
        fn any_record_maps_one_bubble_per_otu(
            rows in prop::collection::vec((0u32..4000, 0.0f64..5000.0, "[A-Za-z;]{0,16}"), 0..80)
        ) {
            let rec = MeasurementRecord {
                id: "1".into(),
                otu_ids: rows.iter().map(|r| r.0).collect(),
                sample_values: rows.iter().map(|r| r.1).collect(),
                otu_labels: rows.iter().map(|r| r.2.clone()).collect(),
            };
            let spec = build_bubble_chart(&rec);
            prop_assert_eq!(spec.len(), rec.len());
            prop_assert_eq!(spec.is_empty(), rec.is_empty());
            prop_assert_eq!(&spec.trace.x, &rec.otu_ids);
            prop_assert_eq!(&spec.trace.y, &rec.sample_values);
            prop_assert_eq!(&spec.trace.text, &rec.otu_labels);
            prop_assert_eq!(&spec.trace.marker.size, &rec.sample_values);
            prop_assert_eq!(&spec.trace.marker.color, &rec.otu_ids);
        }
    }
}
