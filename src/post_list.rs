use std::{fs, io};
use std::path::PathBuf;

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    /// Regular `.html` files directly inside `root_dir`, sorted by path.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if file_name.ends_with(".html") {
                    posts.push(entry.path());
                }
            }
        }
        posts.sort();
        Ok(posts)
    }
}
