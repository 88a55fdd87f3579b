mod csv_file;

pub(crate) use csv_file::{export_to_path, import_from_path};
