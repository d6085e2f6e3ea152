use std::path::{Path, PathBuf};

/// File extensions recognized as device documents, compared
/// case-insensitively.
pub const DEVICE_FILE_EXTS: [&str; 2] = ["yaml", "yml"];

pub fn is_device_file(path: &Path) -> bool {
    match path.extension().and_then(|ex| ex.to_str()) {
        Some(ex) => DEVICE_FILE_EXTS
            .iter()
            .any(|known| ex.eq_ignore_ascii_case(known)),
        None => false,
    }
}

/// Lists the device documents at `path`.
///
/// A directory is searched non-recursively and its documents are returned
/// sorted by name so that every run visits them in the same order. A single
/// document may also be given directly.
pub fn get_files(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = vec![];
    if path.is_dir() {
        let dir = std::fs::read_dir(path)?;
        for f in dir {
            let f = f?;
            let p = f.path();
            if p.is_file() && is_device_file(&p) {
                files.push(p);
            }
        }
        files.sort();
    } else if path.is_file() && is_device_file(path) {
        files.push(path.to_path_buf());
    } else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "{} is neither a directory nor a device document (expected extension {})",
                path.display(),
                DEVICE_FILE_EXTS.join(" or "),
            ),
        ));
    }
    Ok(files)
}
