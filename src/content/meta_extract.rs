use std::collections::HashMap;

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use crate::content::MetadataExtractor;
use crate::content::source_file::SourceFile;
use crate::post::Story;

lazy_static! {
    static ref META_SELECTOR: Selector = Selector::parse("meta[name][content]").unwrap();
}

/// Reads stories described by `<meta name=".." content="..">` tags. `title` and
/// `category` are required, `thumbnail` and `updated` default to empty.
pub struct MetaExtractor {
    url_folder: String,
}

impl MetaExtractor {
    pub fn new(url_folder: &str) -> Self {
        MetaExtractor { url_folder: url_folder.to_string() }
    }
}

/// Every named meta tag; a repeated name keeps its last value.
pub fn meta_tags(raw: &str) -> HashMap<String, String> {
    let doc = Html::parse_document(raw);
    doc.select(&META_SELECTOR)
        .filter_map(|el| {
            let name = el.value().attr("name")?;
            let content = el.value().attr("content")?;
            Some((name.to_string(), content.to_string()))
        })
        .collect()
}

impl MetadataExtractor for MetaExtractor {
    type Record = Story;

    fn extract(&self, source: &SourceFile) -> Option<Story> {
        let mut meta = meta_tags(&source.raw_content);
        let title = meta.remove("title")?;
        let category = meta.remove("category")?;

        Some(Story {
            title,
            category,
            thumbnail: meta.remove("thumbnail").unwrap_or_default(),
            updated: meta.remove("updated").unwrap_or_default(),
            url: format!("/{}/{}", self.url_folder, source.file_name),
            file_name: source.file_name.clone(),
        })
    }
}
