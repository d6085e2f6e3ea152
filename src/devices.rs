use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::header::{header_file_name, render_header};
use crate::io::get_files;
use crate::regmap::{validate_device, DeviceReport, Finding};
use crate::result::Result;
use crate::schema::SchemaValidator;

/// Reports for every device document in a directory, in file name order.
pub struct Summary {
    pub reports: Vec<DeviceReport>,
}

impl Summary {
    /// True when no device has an error.
    pub fn is_ok(&self) -> bool {
        self.reports.iter().all(|r| r.is_ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.reports.iter().flat_map(|r| r.errors.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.reports.iter().flat_map(|r| r.warnings.iter())
    }
}

/// Validates every device document found at `path`. Each document is
/// checked on its own; one failing device does not stop the others.
pub fn validate_dir(path: &Path, schema: &dyn SchemaValidator) -> std::io::Result<Summary> {
    let files = get_files(path)?;
    info!("Found {} device document(s) in {}", files.len(), path.display());
    let reports = files
        .iter()
        .map(|f| validate_device(f, schema))
        .collect();
    Ok(Summary { reports })
}

/// Writes a C header for every device in `summary` into `out_dir` and
/// returns the paths written.
///
/// Devices without a declared name are named after their file stem.
pub fn write_headers(summary: &Summary, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| format!("Could not create {}: {}", out_dir.display(), e))?;

    let mut written = vec![];
    for report in &summary.reports {
        let model = match &report.model {
            Some(model) => model,
            None => {
                debug!("No register map for {}", report.source.display());
                continue;
            }
        };
        let name = match &model.device {
            Some(name) => name.clone(),
            None => report
                .source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| report.device.clone()),
        };

        let source = report.source.display().to_string();
        let header = render_header(model, &name, &source).map_err(|e| e.to_string())?;
        let target = out_dir.join(header_file_name(&name));
        std::fs::write(&target, header)
            .map_err(|e| format!("Could not write {}: {}", target.display(), e))?;
        info!("Wrote {}", target.display());
        written.push(target);
    }
    Ok(written)
}
