use std::{fs, io};
use std::io::ErrorKind;
use std::path::Path;

pub struct SourceFile {
    pub file_name: String,
    pub raw_content: String,
}

impl SourceFile {
    pub fn from_file(file_path: &Path) -> io::Result<SourceFile> {
        let file_name = match file_path.file_name().and_then(|f| f.to_str()) {
            Some(name) => name.to_string(),
            None => return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid file name: {}", file_path.display()))),
        };

        let raw_content = fs::read_to_string(file_path)
            .map_err(|e| io::Error::new(e.kind(), format!("Error reading {}: {}", file_path.display(), e)))?;

        Ok(SourceFile {
            file_name,
            raw_content,
        })
    }

    #[cfg(test)]
    pub fn from_string(file_name: &str, raw_content: &str) -> SourceFile {
        SourceFile {
            file_name: file_name.to_string(),
            raw_content: raw_content.to_string(),
        }
    }
}
