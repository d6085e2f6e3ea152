pub mod result;

pub mod cli;
pub mod devices;
pub mod header;
pub mod io;
pub mod regmap;
pub mod schema;

pub use cli::*;
pub use devices::{validate_dir, write_headers, Summary};
pub use io::get_files;
pub use regmap::{validate_device, validate_value, DeviceReport, Finding};
pub use schema::{JsonSchema, SchemaValidator};
