use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::charts::SampleViews;
use crate::data::model::MeasurementRecord;

// ---------------------------------------------------------------------------
// Chart specs → JSON
// ---------------------------------------------------------------------------

/// Write the views as pretty JSON using Plotly's trace/layout field names.
pub fn write_views_json<W: Write>(views: &SampleViews, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, views).context("serializing chart specs")
}

pub fn save_views_json(views: &SampleViews, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_views_json(views, std::io::BufWriter::new(file))
}

// ---------------------------------------------------------------------------
// OTU table → CSV
// ---------------------------------------------------------------------------

/// One row per OTU in stored order: `otu_id,otu_label,sample_value`.
pub fn write_otu_csv<W: Write>(record: &MeasurementRecord, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["otu_id", "otu_label", "sample_value"])
        .context("writing CSV header")?;

    for ((id, label), value) in record
        .otu_ids
        .iter()
        .zip(&record.otu_labels)
        .zip(&record.sample_values)
    {
        wtr.write_record([id.to_string(), label.clone(), value.to_string()])
            .with_context(|| format!("writing CSV row for OTU {id}"))?;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn save_otu_csv(record: &MeasurementRecord, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_otu_csv(record, file)
}
