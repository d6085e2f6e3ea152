use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use super::coverage::check_field_holes;
use super::error::Finding;
use super::model::Device;
use super::offsets::check_duplicate_offsets;
use super::overlap::check_field_overlaps;
use crate::schema::SchemaValidator;

/// The outcome of validating one device document.
#[derive(Debug)]
pub struct DeviceReport {
    /// Declared device name, or the document's file name.
    pub device: String,
    pub source: PathBuf,
    /// The typed records, when the document could be mapped onto them.
    pub model: Option<Device>,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl DeviceReport {
    /// A device passes when it has no errors. Warnings do not count.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the structural checks over every block of `device`.
///
/// For each register with fields the overlap and hole checks run, then the
/// block's offsets are checked once all of its registers have been seen.
pub fn check_device(
    device: &Device,
    name: &str,
    errors: &mut Vec<Finding>,
    warnings: &mut Vec<Finding>,
) {
    for blk in device.blocks() {
        for reg in blk.registers() {
            let fields = reg.fields();
            if fields.is_empty() {
                continue;
            }

            let path = format!("{}.{}.{}", name, blk.name, reg.name);
            check_field_overlaps(fields, &path, errors);
            // Register width only annotates the hole advisory.
            match reg.width() {
                Ok(width) => check_field_holes(fields, width, &path, warnings),
                Err(e) => debug!("{}: no hole check, width {}", path, e),
            }
        }
        check_duplicate_offsets(blk, name, errors);
    }
}

/// Validates a document that has already been parsed into a generic value.
///
/// The schema check always runs first and never stops the structural checks.
/// If the value cannot be mapped onto the register map records, only the
/// schema findings and a single [`Finding::Document`] are reported.
pub fn validate_value(source: &Path, doc: &Value, schema: &dyn SchemaValidator) -> DeviceReport {
    let source_name = source.display().to_string();
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.clone());

    let mut errors: Vec<Finding> = schema
        .validate(doc)
        .into_iter()
        .map(|message| Finding::SchemaNonconformance {
            source: source_name.clone(),
            message,
        })
        .collect();
    let mut warnings = vec![];

    let (device, model) = match Device::deserialize(doc) {
        Ok(model) => {
            let device = model.name_or(&file_name).to_string();
            check_device(&model, &device, &mut errors, &mut warnings);
            (device, Some(model))
        }
        Err(e) => {
            errors.push(Finding::Document {
                source: source_name,
                message: e.to_string(),
            });
            let device = doc
                .get("device")
                .and_then(Value::as_str)
                .unwrap_or(file_name.as_str())
                .to_string();
            (device, None)
        }
    };

    info!(
        "{}: {} error(s), {} warning(s)",
        device,
        errors.len(),
        warnings.len()
    );
    DeviceReport {
        device,
        source: source.to_path_buf(),
        model,
        errors,
        warnings,
    }
}

/// Reads a YAML document into a generic value.
pub fn load_document(path: &Path) -> Result<Value, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_yaml::from_str(&text).map_err(|e| e.to_string())
}

/// Reads and validates the device document at `source`.
pub fn validate_device(source: &Path, schema: &dyn SchemaValidator) -> DeviceReport {
    debug!("Validating {}", source.display());
    match load_document(source) {
        Ok(doc) => validate_value(source, &doc, schema),
        Err(message) => DeviceReport {
            device: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source: source.to_path_buf(),
            model: None,
            errors: vec![Finding::Document {
                source: source.display().to_string(),
                message,
            }],
            warnings: vec![],
        },
    }
}
