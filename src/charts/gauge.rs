use serde::Serialize;

use super::Axis;
use crate::color::{to_hex, GAUGE_PALETTE, NEEDLE_COLOR};
use crate::data::model::{format_number, MetadataRecord};

/// Degrees of needle sweep per weekly scrub (0–10 scale onto 180°).
pub const DEGREES_PER_SCRUB: f64 = 180.0 / 10.0;
/// Needle length in axis units.
pub const NEEDLE_RADIUS: f64 = 0.5;
/// Half the width of the needle base.
pub const NEEDLE_HALF_WIDTH: f64 = 0.025;

/// Ring segment weights: nine labelled unit segments plus the filler that
/// closes the circle. The filler must stay last and equal the labelled sum.
pub const RING_VALUES: [f64; 10] = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0];
/// Clockwise offset of the first segment from 12 o'clock, in degrees.
pub const RING_ROTATION: f64 = 90.0;
/// Text drawn inside each segment.
pub const RING_TEXT: [&str; 10] = ["8-9", "7-8", "6-7", "5-6", "4-5", "3-4", "2-3", "1-2", "0-1", ""];
/// Hover labels. `2-1` is kept exactly as the source dashboard has it.
pub const RING_LABELS: [&str; 10] = ["8-9", "7-8", "6-7", "5-6", "4-5", "3-4", "2-3", "2-1", "0-1", ""];
/// Hole radius as a fraction of the ring radius.
pub const RING_HOLE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Needle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Needle {
    /// Wash frequency after null → 0.
    pub wfreq: f64,
    /// Sweep from the left end of the dial, `wfreq * 18`.
    pub degree: f64,
    /// Standard-position angle of the needle, `180 - degree`.
    pub pointing_angle_deg: f64,
    /// Needle tip on the circle of radius [`NEEDLE_RADIUS`].
    pub tip: [f64; 2],
    /// SVG path of the needle triangle.
    pub path: String,
}

impl Needle {
    /// No clamping: values outside 0–10 point outside the dial.
    pub fn for_wfreq(wfreq: f64) -> Self {
        let degree = wfreq * DEGREES_PER_SCRUB;
        let pointing_angle_deg = 180.0 - degree;
        let radians = pointing_angle_deg.to_radians();
        let x = NEEDLE_RADIUS * radians.cos();
        let y = NEEDLE_RADIUS * radians.sin();

        let path = format!(
            "M -.0 -{w} L .0 {w} L {} {} Z",
            format_number(x),
            format_number(y),
            w = NEEDLE_HALF_WIDTH,
        );

        Needle {
            wfreq,
            degree,
            pointing_angle_deg,
            tip: [x, y],
            path,
        }
    }

    /// Triangle vertices in axis units: base at the origin, apex at the tip.
    pub fn polygon(&self) -> [[f64; 2]; 3] {
        [[0.0, -NEEDLE_HALF_WIDTH], [0.0, NEEDLE_HALF_WIDTH], self.tip]
    }
}

// ---------------------------------------------------------------------------
// Chart layers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: String,
}

/// The oversized dot at the dial centre carrying the hover value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: [f64; 1],
    pub y: [f64; 1],
    pub marker: MarkerStyle,
    pub showlegend: bool,
    pub name: &'static str,
    pub text: String,
    pub hoverinfo: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingMarker {
    pub colors: Vec<String>,
}

/// Half-donut dial; the last segment is the invisible filler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub values: Vec<f64>,
    pub rotation: f64,
    pub direction: &'static str,
    pub text: Vec<&'static str>,
    pub textinfo: &'static str,
    pub textposition: &'static str,
    pub marker: RingMarker,
    pub labels: Vec<&'static str>,
    pub hoverinfo: &'static str,
    pub hole: f64,
    pub showlegend: bool,
}

impl RingTrace {
    pub fn filler_index(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Angular span `(start, end)` of each segment in standard-position
    /// degrees, laid out counter-clockwise from the rotation offset.
    pub fn segment_spans(&self) -> Vec<(f64, f64)> {
        let total: f64 = self.values.iter().sum();
        if total <= 0.0 {
            return vec![(0.0, 0.0); self.values.len()];
        }
        let mut start = 90.0 - self.rotation;
        self.values
            .iter()
            .map(|v| {
                let end = start + v / total * 360.0;
                let span = (start, end);
                start = end;
                span
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeLine {
    pub color: String,
}

/// Overlay shape drawing the needle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub path: String,
    pub fillcolor: String,
    pub line: ShapeLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeLayout {
    pub shapes: Vec<Shape>,
    pub title: String,
    pub height: u32,
    pub width: u32,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeChartSpec {
    pub center: CenterTrace,
    pub ring: RingTrace,
    pub needle: Needle,
    pub layout: GaugeLayout,
}

fn hidden_axis() -> Axis {
    Axis {
        title: None,
        range: Some([-1.0, 1.0]),
        zeroline: Some(false),
        showticklabels: Some(false),
        showgrid: Some(false),
    }
}

/// Wash-frequency dial for one subject. A null or absent `wfreq` reads as 0.
pub fn build_gauge_chart(meta: &MetadataRecord) -> GaugeChartSpec {
    let wfreq = meta.wfreq().unwrap_or(0.0);
    let needle = Needle::for_wfreq(wfreq);
    let needle_hex = to_hex(NEEDLE_COLOR);

    GaugeChartSpec {
        center: CenterTrace {
            kind: "scatter",
            x: [0.0],
            y: [0.0],
            marker: MarkerStyle {
                size: 50,
                color: needle_hex.clone(),
            },
            showlegend: false,
            name: "WASH FREQ",
            text: format_number(wfreq),
            hoverinfo: "text+name",
        },
        ring: RingTrace {
            kind: "pie",
            values: RING_VALUES.to_vec(),
            rotation: RING_ROTATION,
            direction: "counterclockwise",
            text: RING_TEXT.to_vec(),
            textinfo: "text",
            textposition: "inside",
            marker: RingMarker {
                colors: GAUGE_PALETTE.iter().map(|c| to_hex(*c)).collect(),
            },
            labels: RING_LABELS.to_vec(),
            hoverinfo: "text",
            hole: RING_HOLE,
            showlegend: false,
        },
        layout: GaugeLayout {
            shapes: vec![Shape {
                kind: "path",
                path: needle.path.clone(),
                fillcolor: needle_hex.clone(),
                line: ShapeLine { color: needle_hex },
            }],
            title: "<b>Belly Button Washing Frequency</b> <br> <b>Scrubs per Week</b>".to_string(),
            height: 550,
            width: 550,
            xaxis: hidden_axis(),
            yaxis: hidden_axis(),
        },
        needle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{MetadataValue, SampleId};
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn meta(wfreq: MetadataValue) -> MetadataRecord {
        MetadataRecord {
            id: SampleId::new("940"),
            fields: vec![("id".into(), MetadataValue::Integer(940)), ("wfreq".into(), wfreq)],
        }
    }

    #[test]
    fn zero_points_left_and_ten_points_right() {
        let left = Needle::for_wfreq(0.0);
        assert_eq!(left.degree, 0.0);
        assert_eq!(left.pointing_angle_deg, 180.0);
        assert!(close(left.tip[0], -0.5));
        assert!(close(left.tip[1], 0.0));

        let right = Needle::for_wfreq(10.0);
        assert_eq!(right.degree, 180.0);
        assert_eq!(right.pointing_angle_deg, 0.0);
        assert_eq!(right.tip, [0.5, 0.0]);
        assert_eq!(right.path, "M -.0 -0.025 L .0 0.025 L 0.5 0 Z");
    }

    #[test]
    fn null_and_missing_wfreq_read_as_zero() {
        let spec = build_gauge_chart(&meta(MetadataValue::Null));
        assert_eq!(spec.needle.wfreq, 0.0);
        assert_eq!(spec.needle.pointing_angle_deg, 180.0);
        assert_eq!(spec.center.text, "0");

        let bare = MetadataRecord {
            id: SampleId::new("1"),
            fields: vec![],
        };
        assert_eq!(build_gauge_chart(&bare).needle.wfreq, 0.0);
    }

    #[test]
    fn three_scrubs_point_at_126_degrees() {
        let spec = build_gauge_chart(&meta(MetadataValue::Float(3.0)));
        assert!(close(spec.needle.pointing_angle_deg, 126.0));
        assert_eq!(spec.layout.shapes[0].path, spec.needle.path);
        assert!(spec.needle.path.starts_with("M -.0 -0.025 L .0 0.025 L -0.29389262614623"));
    }

    #[test]
    fn out_of_range_wfreq_is_not_clamped() {
        let needle = Needle::for_wfreq(12.0);
        assert!(close(needle.degree, 216.0));
        assert!(close(needle.pointing_angle_deg, -36.0));
        // below the horizontal, outside the visible half of the dial
        assert!(needle.tip[1] < 0.0);
        assert!(close(needle.tip[0].hypot(needle.tip[1]), NEEDLE_RADIUS));
    }

    #[test]
    fn palette_covers_every_segment() {
        assert!(GAUGE_PALETTE.len() >= RING_VALUES.len());
        assert_eq!(RING_TEXT.len(), RING_VALUES.len());
        assert_eq!(RING_LABELS.len(), RING_VALUES.len());
    }

    #[test]
    fn filler_is_last_and_largest() {
        let spec = build_gauge_chart(&meta(MetadataValue::Integer(5)));
        let ring = &spec.ring;
        let filler = ring.filler_index();
        assert_eq!(filler, 9);
        assert!(ring.values[..filler].iter().all(|v| *v < ring.values[filler]));
        assert_eq!(ring.values[..filler].iter().sum::<f64>(), ring.values[filler]);
        assert_eq!(ring.text[filler], "");
    }

    #[test]
    fn labelled_segments_span_the_upper_half() {
        let spec = build_gauge_chart(&meta(MetadataValue::Integer(5)));
        let spans = spec.ring.segment_spans();
        assert!(close(spans[0].0, 0.0));
        assert!(close(spans[0].1, 20.0));
        assert!(close(spans[8].1, 180.0));
        assert!(close(spans[9].0, 180.0));
        assert!(close(spans[9].1, 360.0));
    }

    #[test]
    fn mislabelled_segment_is_preserved() {
        let spec = build_gauge_chart(&meta(MetadataValue::Integer(1)));
        assert_eq!(spec.ring.labels[7], "2-1");
        assert_eq!(spec.ring.text[7], "1-2");
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]
        #[test]
        fn needle_angle_is_linear_and_unclamped(wfreq in -50.0f64..50.0) {
            let spec = build_gauge_chart(&meta(MetadataValue::Float(wfreq)));
            let needle = &spec.needle;
            prop_assert_eq!(needle.wfreq, wfreq);
            prop_assert!((needle.degree - wfreq * 18.0).abs() < 1e-9);
            prop_assert!((needle.pointing_angle_deg - (180.0 - wfreq * 18.0)).abs() < 1e-9);
            prop_assert!((needle.tip[0].hypot(needle.tip[1]) - NEEDLE_RADIUS).abs() < 1e-9);
            prop_assert_eq!(&spec.layout.shapes[0].path, &needle.path);
        }
    }
}
