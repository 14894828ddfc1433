use std::{fs, io};
use std::path::Path;

use serde::Serialize;

pub fn write_page(path: &Path, html: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)
        .map_err(|e| io::Error::new(e.kind(), format!("Error writing {}: {}", path.display(), e)))
}

/// Pretty JSON dump of the parsed records. Nothing reads it back.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, records: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(io::Error::from)?;
    write_page(path, &json)
}
