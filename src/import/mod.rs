mod csv_import;
mod detect;

pub(crate) use csv_import::{CsvImporter, CsvProfile};
pub(crate) use detect::detect_bank_format;
