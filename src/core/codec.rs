use crate::domain::model::{DecodedRecords, DomainRecord, FileFormat, SkipReason, SkippedLine};
use crate::domain::ports::RecordCodec;
use crate::utils::error::{DashboardError, Result};

const FIELD_COUNT: usize = 3;

/// Unquoted `name,score,description` lines. Descriptions containing a comma
/// do not survive a round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

/// RFC 4180 quoting through the `csv` crate, no header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

pub fn codec_for(format: FileFormat) -> Box<dyn RecordCodec> {
    match format {
        FileFormat::Plain => Box::new(PlainCodec),
        FileFormat::Csv => Box::new(CsvCodec),
    }
}

fn build_record(line_number: usize, fields: &[&str]) -> std::result::Result<DomainRecord, SkippedLine> {
    if fields.len() != FIELD_COUNT {
        return Err(SkippedLine {
            line_number,
            reason: SkipReason::FieldCount {
                found: fields.len(),
            },
        });
    }

    let raw_score = fields[1].trim();
    let score = raw_score.parse::<i32>().map_err(|_| SkippedLine {
        line_number,
        reason: SkipReason::InvalidScore {
            value: raw_score.to_string(),
        },
    })?;

    Ok(DomainRecord::new(fields[0], score, fields[2]))
}

fn push_decoded(decoded: &mut DecodedRecords, line_number: usize, fields: &[&str]) {
    match build_record(line_number, fields) {
        Ok(record) => decoded.records.push(record),
        Err(skipped) => {
            tracing::warn!("Skipping line {}: {}", skipped.line_number, skipped.reason);
            decoded.skipped.push(skipped);
        }
    }
}

impl RecordCodec for PlainCodec {
    fn encode(&self, records: &[DomainRecord]) -> Result<String> {
        let mut output = String::new();
        for record in records {
            output.push_str(&format!(
                "{},{},{}\n",
                record.name, record.readiness_score, record.description
            ));
        }
        Ok(output)
    }

    fn decode(&self, content: &str) -> Result<DecodedRecords> {
        let mut decoded = DecodedRecords::default();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            push_decoded(&mut decoded, index + 1, &fields);
        }

        Ok(decoded)
    }
}

impl RecordCodec for CsvCodec {
    fn encode(&self, records: &[DomainRecord]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        for record in records {
            writer.write_record([
                record.name.as_str(),
                record.readiness_score.to_string().as_str(),
                record.description.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| {
                DashboardError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
            })?;
        String::from_utf8(bytes).map_err(|e| {
            DashboardError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn decode(&self, content: &str) -> Result<DecodedRecords> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut decoded = DecodedRecords::default();
        for (index, result) in reader.records().enumerate() {
            let row = result?;
            let line_number = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            let fields: Vec<&str> = row.iter().collect();
            push_decoded(&mut decoded, line_number, &fields);
        }

        Ok(decoded)
    }
}
