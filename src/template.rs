use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use spdlog::debug;

#[derive(Default, Debug, Clone)]
pub struct TemplateContext {
    values: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }
}

/// Single pass over `template`: known `{{ key }}` placeholders are replaced
/// unescaped, unknown ones are kept.
pub fn render(template: &str, context: &TemplateContext) -> String {
    lazy_static! {
        static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{\{ (\w+) \}\}").unwrap();
    }

    PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| {
        match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    }).into_owned()
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match fs::read_to_string(&full_path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(io::Error::new(
            ErrorKind::NotFound, format!("File {} not found", full_path.display()))),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error reading {}: {}", full_path.display(), e))),
    }
}

fn read_optional(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    match read_template(tpl_dir, file_name) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Optional fragment {} not present, using empty content", file_name);
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteFragments {
    pub head: String,
    pub js: String,
    pub header: String,
    pub sidebar: String,
    pub footer: String,
}

impl SiteFragments {
    pub const HEAD: &'static str = "custom_head.html";
    pub const JS: &'static str = "custom_js.html";
    pub const HEADER: &'static str = "custom_header.html";
    pub const SIDEBAR: &'static str = "custom_sidebar.html";
    pub const FOOTER: &'static str = "custom_footer.html";

    /// Head, header and footer are required, a missing one fails the whole run.
    pub fn load(custom_dir: &Path) -> io::Result<SiteFragments> {
        Ok(SiteFragments {
            header: read_template(custom_dir, Self::HEADER)?,
            footer: read_template(custom_dir, Self::FOOTER)?,
            head: read_template(custom_dir, Self::HEAD)?,
            js: read_optional(custom_dir, Self::JS)?,
            sidebar: read_optional(custom_dir, Self::SIDEBAR)?,
        })
    }

    pub fn full_head(&self) -> String {
        format!("{}{}", self.head, self.js)
    }

    pub fn fill(&self, context: TemplateContext) -> TemplateContext {
        context
            .with("custom_head", self.full_head())
            .with("custom_header", self.header.as_str())
            .with("custom_sidebar", self.sidebar.as_str())
            .with("custom_footer", self.footer.as_str())
    }
}
