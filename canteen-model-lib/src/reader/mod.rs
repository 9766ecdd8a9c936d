use std::sync::Arc;

use crate::error::{ProcessingState, ProcessorError, RowTransformError};
use crate::types::RawRecord;

/// Rows decoded from an upload, plus any rows that had to be skipped.
#[derive(Debug, Default)]
pub struct DecodedRecords {
    pub records: Vec<RawRecord>,
    pub state: ProcessingState,
}

/// Decode comma separated bytes with a header row into records.
///
/// Rows may be shorter or longer than the header; that is checked per row later
/// so a single bad line does not reject the file. A row that is not valid UTF-8
/// is skipped here.
pub fn decode_records(bytes: &[u8]) -> Result<DecodedRecords, ProcessorError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Arc<[String]> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect::<Vec<_>>()
        .into();

    let mut decoded = DecodedRecords::default();
    for (i, result) in rdr.records().enumerate() {
        match result {
            Ok(record) => decoded.records.push(RawRecord::new(
                Arc::clone(&headers),
                record.iter().map(str::to_string).collect(),
            )),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                decoded
                    .state
                    .drop_row(i + 1, &RowTransformError::Undecodable(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("{} records detected", decoded.records.len());
    Ok(decoded)
}

/// Decode on the blocking pool so a large upload does not stall the runtime.
pub async fn load_records(bytes: Vec<u8>) -> Result<DecodedRecords, ProcessorError> {
    tokio::task::spawn_blocking(move || decode_records(&bytes))
        .await
        .map_err(|e| ProcessorError::Io(std::io::Error::other(e)))?
}
