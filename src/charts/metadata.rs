use std::fmt;

use serde::Serialize;

use crate::data::model::MetadataRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataLine {
    pub key: String,
    pub value: String,
}

impl fmt::Display for MetadataLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Contents of the "Demographic Info" panel. Always rebuilt whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataListing {
    pub lines: Vec<MetadataLine>,
}

/// One line per attribute in document order, key upper-cased.
pub fn build_metadata_listing(meta: &MetadataRecord) -> MetadataListing {
    MetadataListing {
        lines: meta
            .fields
            .iter()
            .map(|(key, value)| MetadataLine {
                key: key.to_uppercase(),
                value: value.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{MetadataValue, SampleId};

    #[test]
    fn lines_follow_document_order() {
        let meta = MetadataRecord {
            id: SampleId::new("940"),
            fields: vec![
                ("id".into(), MetadataValue::Integer(940)),
                ("ethnicity".into(), MetadataValue::String("Caucasian".into())),
                ("age".into(), MetadataValue::Float(24.0)),
                ("location".into(), MetadataValue::String("Beaufort/NC".into())),
                ("wfreq".into(), MetadataValue::Null),
            ],
        };
        let rendered: Vec<String> = build_metadata_listing(&meta)
            .lines
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            [
                "ID: 940",
                "ETHNICITY: Caucasian",
                "AGE: 24",
                "LOCATION: Beaufort/NC",
                "WFREQ: null",
            ]
        );
    }
}
