use std::path::Path;

use clap::{App, Arg, ArgMatches};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::devices::Summary;

// Exit Codes for different types of errors
pub const ERR_USAGE: i32 = 1;
pub const ERR_VALIDATION: i32 = 2;
pub const ERR_IO: i32 = 3;

pub fn configure_cli() -> clap::App<'static, 'static> {
    let app = App::new("Register Map Checker")
        .version("0.1.0")
        .author("Erich Ess")
        .about("Validates register map documents against a JSON schema and checks them for overlapping bitfields and colliding register offsets")
        .arg(
            Arg::with_name("schema")
                .index(1)
                .required(true)
                .help("JSON schema every device document must conform to"),
        )
        .arg(
            Arg::with_name("devices")
                .index(2)
                .required(true)
                .help("Directory of device documents (*.yaml, *.yml) to validate"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .takes_value(true)
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .help("Writes diagnostic logging at the given level to stderr"),
        )
        .arg(
            Arg::with_name("header-dir")
                .long("header-dir")
                .takes_value(true)
                .help("When every device passes, writes a C header of register offsets for each device into this directory"),
        );
    app
}

pub fn get_schema_path<'a>(args: &'a ArgMatches) -> Option<&'a Path> {
    args.value_of("schema").map(Path::new)
}

pub fn get_devices_path<'a>(args: &'a ArgMatches) -> Option<&'a Path> {
    args.value_of("devices").map(Path::new)
}

pub fn get_header_dir<'a>(args: &'a ArgMatches) -> Option<&'a Path> {
    args.value_of("header-dir").map(Path::new)
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    args.value_of("log").and_then(|level| level.parse().ok())
}

pub fn configure_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

pub fn print_errs(summary: &Summary) {
    println!("Validation FAILED:");
    for e in summary.errors() {
        println!(" - {}", e);
    }
}

pub fn print_warnings(summary: &Summary) {
    for w in summary.warnings() {
        println!("warning: {}", w);
    }
}
