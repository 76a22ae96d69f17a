use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// SampleId – canonical identifier shared by metadata and measurements
// ---------------------------------------------------------------------------

/// Canonical sample identifier.
///
/// The source document stores `metadata[].id` as a number and `samples[].id`
/// as a string; both are normalized into this form by the loader so every
/// lookup is a plain string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SampleId(String);

impl SampleId {
    /// Trimmed string id; text that reads as a finite number takes the
    /// numeric canonical form, so `"940.0"` and `" 0940"` equal `940`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => SampleId::from_number(n),
            _ => SampleId(trimmed.to_string()),
        }
    }

    /// Canonical form of a numeric id: integral values drop the fraction.
    pub fn from_number(n: f64) -> Self {
        SampleId(format_number(n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(s: &str) -> Self {
        SampleId::new(s)
    }
}

/// Print a number the way the dashboard shows it: `24.0` → `24`, `1.5` → `1.5`,
/// tiny magnitudes in exponent form (`6.1e-17`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n:?}")
    }
}

// ---------------------------------------------------------------------------
// MetadataValue – a single attribute of a metadata record
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata value as found in the JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{}", format_number(*v)),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "null"),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Demographic attributes of one test subject, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub id: SampleId,
    /// `(key, value)` pairs exactly as they appear in the document,
    /// including the `id` attribute itself.
    pub fields: Vec<(String, MetadataValue)>,
}

impl MetadataRecord {
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Weekly wash frequency; `None` when absent or null.
    pub fn wfreq(&self) -> Option<f64> {
        self.get("wfreq").and_then(MetadataValue::as_f64)
    }
}

/// OTU observations of one sample. The three vectors are positionally
/// aligned: index `i` in each describes the same taxon.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub id: SampleId,
    pub otu_ids: Vec<u32>,
    pub otu_labels: Vec<String>,
    pub sample_values: Vec<f64>,
}

impl MeasurementRecord {
    /// Number of OTU observations.
    pub fn len(&self) -> usize {
        self.otu_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.otu_ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded document
// ---------------------------------------------------------------------------

/// Lookup of a sample id that has no matching record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("sample {0} not found in metadata records")]
    MetadataNotFound(SampleId),
    #[error("sample {0} not found in measurement records")]
    MeasurementNotFound(SampleId),
}

/// The full parsed dataset. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Selector entries, in document order.
    pub names: Vec<SampleId>,
    pub metadata: Vec<MetadataRecord>,
    pub samples: Vec<MeasurementRecord>,
}

impl Dataset {
    /// First metadata record whose id matches.
    pub fn metadata_for(&self, id: &SampleId) -> Result<&MetadataRecord, LookupError> {
        self.metadata
            .iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| LookupError::MetadataNotFound(id.clone()))
    }

    /// First measurement record whose id matches.
    pub fn sample_for(&self, id: &SampleId) -> Result<&MeasurementRecord, LookupError> {
        self.samples
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| LookupError::MeasurementNotFound(id.clone()))
    }

    /// Names lacking a metadata or a measurement record.
    pub fn orphan_names(&self) -> Vec<&SampleId> {
        self.names
            .iter()
            .filter(|n| self.metadata_for(n).is_err() || self.sample_for(n).is_err())
            .collect()
    }

    /// Number of selectable samples.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            names: vec!["940".into(), "941".into()],
            metadata: vec![MetadataRecord {
                id: SampleId::from_number(940.0),
                fields: vec![
                    ("id".into(), MetadataValue::Integer(940)),
                    ("wfreq".into(), MetadataValue::Null),
                ],
            }],
            samples: vec![MeasurementRecord {
                id: "940".into(),
                otu_ids: vec![1167],
                otu_labels: vec!["Bacteria".into()],
                sample_values: vec![163.0],
            }],
        }
    }

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        assert_eq!(SampleId::from_number(940.0), SampleId::new(" 940 "));
        assert_eq!(SampleId::from_number(1.5).as_str(), "1.5");
        assert_eq!(SampleId::new("940.0"), SampleId::from_number(940.0));
        assert_eq!(SampleId::new(" 0940"), SampleId::from_number(940.0));
        assert_eq!(SampleId::new("S1").as_str(), "S1");
        assert_eq!(SampleId::new("NaN").as_str(), "NaN");
    }

    #[test]
    fn lookup_miss_is_reported() {
        let ds = dataset();
        let missing = SampleId::new("941");
        assert_eq!(
            ds.metadata_for(&missing),
            Err(LookupError::MetadataNotFound(missing.clone()))
        );
        assert_eq!(
            ds.sample_for(&missing).unwrap_err().to_string(),
            "sample 941 not found in measurement records"
        );
        assert_eq!(ds.orphan_names(), vec![&missing]);
    }

    #[test]
    fn null_wfreq_reads_as_none() {
        let ds = dataset();
        let rec = ds.metadata_for(&"940".into()).unwrap();
        assert_eq!(rec.wfreq(), None);
    }

    #[test]
    fn metadata_values_display_like_the_panel() {
        assert_eq!(MetadataValue::Float(24.0).to_string(), "24");
        assert_eq!(MetadataValue::Float(2.5).to_string(), "2.5");
        assert_eq!(MetadataValue::Null.to_string(), "null");
        assert_eq!(MetadataValue::String("Beaufort/NC".into()).to_string(), "Beaufort/NC");
    }
}
