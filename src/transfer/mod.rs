mod export;
mod import;

pub(crate) use export::{export_to_path, export_transactions, DEFAULT_FILE_NAME};
pub(crate) use import::{import_from_path, import_transactions};

#[cfg(test)]
#[path = "export_tests.rs"]
mod export_tests;
