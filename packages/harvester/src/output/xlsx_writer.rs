//! XLSX writer for parsed records.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::{write_atomic, CSV_HEADERS};
use crate::error::Result;
use crate::types::Record;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Audit";

/// Generate an XLSX workbook for `records`.
///
/// One worksheet with a bold header row followed by one row per record, in
/// the same column order as the CSV output.
pub fn generate_xlsx(records: &[Record]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(CSV_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, value) in (0u16..).zip(record_cells(record)) {
            worksheet.write_string(row, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Save records as an XLSX file.
pub fn save_xlsx(records: &[Record], path: &Path) -> Result<()> {
    let content = generate_xlsx(records)?;
    write_atomic(path, &content)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Wrote XLSX");
    Ok(())
}

fn record_cells(record: &Record) -> [&str; 6] {
    [
        record.section.as_str(),
        record.level.as_str(),
        record.name.as_str(),
        record.description.as_str(),
        record.remediation_procedure.as_str(),
        record.nist.as_str(),
    ]
}
