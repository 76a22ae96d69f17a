use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{Dataset, MeasurementRecord, MetadataRecord, MetadataValue, SampleId};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a biodiversity dataset from a file.  Dispatch by extension.
///
/// Only `.json` documents are supported:
///
/// ```json
/// {
///   "names": ["940", "941"],
///   "metadata": [{ "id": 940, "gender": "F", "wfreq": 2.0 }, ...],
///   "samples": [{ "id": "940", "otu_ids": [...], "otu_labels": [...], "sample_values": [...] }, ...]
/// }
/// ```
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_dataset(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON document
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawDataset {
    names: Vec<JsonValue>,
    metadata: Vec<Map<String, JsonValue>>,
    samples: Vec<RawSample>,
}

#[derive(Deserialize)]
struct RawSample {
    id: JsonValue,
    otu_ids: Vec<u32>,
    otu_labels: Vec<String>,
    sample_values: Vec<f64>,
}

/// Parse a dataset document, normalizing every identifier to [`SampleId`].
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let raw: RawDataset = serde_json::from_str(text).context("parsing dataset JSON")?;

    let names = raw
        .names
        .iter()
        .enumerate()
        .map(|(i, v)| normalize_id(v).with_context(|| format!("names[{i}]")))
        .collect::<Result<Vec<_>>>()?;

    let mut metadata = Vec::with_capacity(raw.metadata.len());
    for (i, obj) in raw.metadata.into_iter().enumerate() {
        let id = obj
            .get("id")
            .with_context(|| format!("metadata[{i}]: missing 'id'"))
            .and_then(|v| normalize_id(v).with_context(|| format!("metadata[{i}]")))?;

        let fields = obj
            .into_iter()
            .map(|(key, val)| (key, json_to_metadata(&val)))
            .collect();

        metadata.push(MetadataRecord { id, fields });
    }

    let mut samples = Vec::with_capacity(raw.samples.len());
    for (i, rec) in raw.samples.into_iter().enumerate() {
        let id = normalize_id(&rec.id).with_context(|| format!("samples[{i}]"))?;

        let n = rec.otu_ids.len();
        if rec.otu_labels.len() != n || rec.sample_values.len() != n {
            bail!(
                "samples[{i}] ({id}): otu_ids has {n} values, otu_labels {}, sample_values {}",
                rec.otu_labels.len(),
                rec.sample_values.len()
            );
        }

        samples.push(MeasurementRecord {
            id,
            otu_ids: rec.otu_ids,
            otu_labels: rec.otu_labels,
            sample_values: rec.sample_values,
        });
    }

    let dataset = Dataset {
        names,
        metadata,
        samples,
    };

    for name in dataset.orphan_names() {
        log::warn!("sample {name} is listed in names but lacks a metadata or measurement record");
    }

    Ok(dataset)
}

/// Identifiers arrive either as JSON numbers (`metadata`) or strings
/// (`names`, `samples`); both map onto the same canonical string.
fn normalize_id(val: &JsonValue) -> Result<SampleId> {
    match val {
        JsonValue::String(s) => Ok(SampleId::new(s.as_str())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SampleId::new(i.to_string()))
            } else if let Some(f) = n.as_f64() {
                Ok(SampleId::from_number(f))
            } else {
                Ok(SampleId::new(n.to_string()))
            }
        }
        other => bail!("identifier must be a string or number, got {other}"),
    }
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "names": ["940", "941"],
        "metadata": [
            {"id": 940, "ethnicity": "Caucasian", "gender": "F", "age": 24.0, "wfreq": 2.0},
            {"id": 941.0, "ethnicity": "Caucasian", "gender": "F", "age": 34.0, "wfreq": null}
        ],
        "samples": [
            {"id": "940", "otu_ids": [1167, 2859], "sample_values": [163, 126],
             "otu_labels": ["Bacteria", "Bacteria;Firmicutes"]},
            {"id": "941", "otu_ids": [], "sample_values": [], "otu_labels": []}
        ]
    }"#;

    #[test]
    fn ids_are_normalized_across_sections() {
        let ds = parse_dataset(DOC).unwrap();
        let id = SampleId::new("941");
        assert_eq!(ds.names[1], id);
        assert_eq!(ds.metadata_for(&id).unwrap().id, id);
        assert!(ds.sample_for(&id).unwrap().is_empty());
        assert!(ds.orphan_names().is_empty());
    }

    #[test]
    fn numerically_equal_names_match_numeric_metadata_ids() {
        let doc = r#"{
            "names": ["940.0", " 0940"],
            "metadata": [{"id": 940, "wfreq": 1}],
            "samples": [{"id": "0940", "otu_ids": [1], "otu_labels": ["a"], "sample_values": [2]}]
        }"#;
        let ds = parse_dataset(doc).unwrap();
        for name in &ds.names {
            assert_eq!(name.as_str(), "940");
            assert!(ds.metadata_for(name).is_ok());
            assert!(ds.sample_for(name).is_ok());
        }
        assert!(crate::charts::build_sample_views(&ds, &ds.names[0]).is_ok());
    }

    #[test]
    fn metadata_keeps_document_order() {
        let ds = parse_dataset(DOC).unwrap();
        let keys: Vec<&str> = ds.metadata[0].fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["id", "ethnicity", "gender", "age", "wfreq"]);
        assert_eq!(ds.metadata[0].wfreq(), Some(2.0));
        assert_eq!(ds.metadata[1].get("wfreq"), Some(&MetadataValue::Null));
    }

    #[test]
    fn misaligned_arrays_fail_the_load() {
        let doc = r#"{"names": ["1"], "metadata": [{"id": 1}],
            "samples": [{"id": "1", "otu_ids": [1, 2], "otu_labels": ["a"], "sample_values": [3, 4]}]}"#;
        let err = parse_dataset(doc).unwrap_err();
        assert!(format!("{err:#}").contains("otu_labels 1"));
    }

    #[test]
    fn missing_top_level_field_is_an_error() {
        let err = parse_dataset(r#"{"names": [], "metadata": []}"#).unwrap_err();
        assert!(format!("{err:#}").contains("parsing dataset JSON"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("samples.csv")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .csv");
    }
}
