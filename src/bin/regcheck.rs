extern crate log;
extern crate simplelog;

use std::process::exit;

use regcheck::*;

fn main() {
    // Missing or invalid arguments exit with ERR_USAGE.
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        if let Err(e) = configure_logging(level) {
            eprintln!("Failed to configure logger: {}", e);
        }
    }

    let (schema_path, devices_path) = match (get_schema_path(&config), get_devices_path(&config)) {
        (Some(schema), Some(devices)) => (schema, devices),
        _ => {
            eprintln!("Usage: regcheck <SCHEMA> <DEVICES_DIR>");
            exit(ERR_USAGE)
        }
    };

    let schema = match JsonSchema::read(schema_path) {
        Ok(schema) => schema,
        Err(msg) => {
            eprintln!("{}", msg);
            exit(ERR_IO)
        }
    };

    let summary = match validate_dir(devices_path, &schema) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Could not read {}: {}", devices_path.display(), e);
            exit(ERR_IO)
        }
    };

    if !summary.is_ok() {
        print_errs(&summary);
        exit(ERR_VALIDATION)
    }

    if let Some(out_dir) = get_header_dir(&config) {
        if let Err(msg) = write_headers(&summary, out_dir) {
            eprintln!("{}", msg);
            exit(ERR_IO)
        }
    }

    println!("Validation OK");
    print_warnings(&summary);
}
