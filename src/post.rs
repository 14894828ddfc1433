use serde::Serialize;

use crate::content::html_extract::first_image_src;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub title: String,
    pub content: String,
    pub labels: Vec<String>,
    pub id: String,
    pub source_filename: String,
}

impl PostRecord {
    pub fn thumbnail(&self, fallback: &str) -> String {
        first_image_src(&self.content).unwrap_or_else(|| fallback.to_string())
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.html", self.id)
    }

    pub fn link(&self) -> String {
        format!("/{}", self.output_file_name())
    }

    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(|l| l.as_str())
    }

    pub fn shares_label_with(&self, other: &PostRecord) -> bool {
        self.labels.iter().any(|l| other.labels.contains(l))
    }
}

/// A story described by `<meta>` tags, grouped by exactly one category.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Story {
    pub title: String,
    pub category: String,
    pub thumbnail: String,
    /// Compared as plain text when ordering stories.
    pub updated: String,
    pub file_name: String,
    pub url: String,
}
