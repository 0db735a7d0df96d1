//! Writes a filtered transaction set as a CSV report.

use std::io::Write;

use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, models::Transaction};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The report columns, named after the stored schema.
const HEADERS: [&str; 7] = [
    "id",
    "fecha",
    "tipo",
    "categoria",
    "monto",
    "nota",
    "ubicacion",
];

/// Write `transactions` to `writer` as CSV.
///
/// Dates are formatted as `YYYY-MM-DD` strings and missing notes as empty
/// fields. The caller is expected to have filtered the set to the report
/// window already.
///
/// # Errors
/// Returns an [Error::Csv] if the report cannot be written.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(HEADERS)?;

    for transaction in transactions {
        let date = transaction
            .date
            .format(DATE_FORMAT)
            .map_err(|error| Error::Csv(error.to_string()))?;

        writer.write_record(&[
            transaction.id.to_string(),
            date,
            transaction.kind.as_db_str().to_string(),
            transaction.category.clone(),
            transaction.amount.to_string(),
            transaction.note.clone().unwrap_or_default(),
            transaction.location.clone(),
        ])?;
    }

    writer
        .flush()
        .map_err(|error| Error::Csv(error.to_string()))?;

    Ok(())
}
