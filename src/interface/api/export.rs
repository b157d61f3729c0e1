//! CSV export of the call log

use crate::domain::call::CallRecord;
use crate::domain::shared::DomainError;

pub const CSV_FILENAME: &str = "elevator_data.csv";

const CSV_HEADER: [&str; 5] = [
    "id",
    "current_floor",
    "demand_floor",
    "destination_floor",
    "call_datetime",
];

/// Render records as CSV, header first, rows in the given order.
///
/// Without `include_call_datetime` the last column is dropped.
pub fn render_csv(records: &[CallRecord], include_call_datetime: bool) -> Result<String, DomainError> {
    let columns = if include_call_datetime { 5 } else { 4 };
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&CSV_HEADER[..columns]).map_err(csv_error)?;

    for call in records {
        let mut row = vec![
            call.id.to_string(),
            call.current_floor.to_string(),
            call.demand_floor.to_string(),
            call.destination_floor.to_string(),
        ];
        if include_call_datetime {
            row.push(call.call_datetime.to_string());
        }
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::storage(format!("CSV export failed: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| DomainError::storage(format!("CSV export failed: {}", e)))
}

fn csv_error(e: csv::Error) -> DomainError {
    DomainError::storage(format!("CSV export failed: {}", e))
}
