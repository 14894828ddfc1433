use std::io;
use std::path::Path;

use spdlog::{info, warn};

use crate::content::source_file::SourceFile;
use crate::post_list::PostList;

pub mod html_extract;
pub mod meta_extract;
pub mod source_file;

pub trait MetadataExtractor {
    type Record;

    /// `None` means the file is not a usable record and is left out.
    fn extract(&self, source: &SourceFile) -> Option<Self::Record>;
}

/// Reads every `.html` file in `dir` through `extractor`. Files that cannot be
/// read are logged and skipped; a missing folder yields an empty collection.
pub fn load_records<E: MetadataExtractor>(extractor: &E, dir: &Path) -> io::Result<Vec<E::Record>> {
    if !dir.is_dir() {
        warn!("Input folder {} does not exist, nothing to read", dir.display());
        return Ok(vec![]);
    }

    let post_list = PostList { root_dir: dir.to_path_buf() };
    let mut records = vec![];
    for path in post_list.retrieve_files()? {
        let source = match SourceFile::from_file(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Skipping file {}: {}", path.display(), e);
                continue;
            }
        };

        match extractor.extract(&source) {
            Some(record) => records.push(record),
            None => info!("File {} has no usable metadata, leaving it out", source.file_name),
        }
    }

    Ok(records)
}
