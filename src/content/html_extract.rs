use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::content::MetadataExtractor;
use crate::content::source_file::SourceFile;
use crate::post::PostRecord;
use crate::text_utils::{file_stem, slugify};

lazy_static! {
    static ref TITLE_SELECTOR: Selector = Selector::parse("title").unwrap();
    static ref H1_SELECTOR: Selector = Selector::parse("h1").unwrap();
    static ref H2_SELECTOR: Selector = Selector::parse("h2").unwrap();
    static ref BODY_SELECTOR: Selector = Selector::parse("body").unwrap();
    static ref LABELS_BY_CLASS: Selector = Selector::parse("div.post-labels").unwrap();
    static ref LABELS_BY_ID: Selector = Selector::parse("div#post-labels").unwrap();
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a").unwrap();
    static ref IMG_SELECTOR: Selector = Selector::parse("img").unwrap();
    // The parser always synthesizes a <body>, so the source text decides whether one was written.
    static ref BODY_TAG_REGEX: Regex = Regex::new(r"(?i)<body[\s>/]").unwrap();
}

pub struct HtmlExtractor;

impl MetadataExtractor for HtmlExtractor {
    type Record = PostRecord;

    fn extract(&self, source: &SourceFile) -> Option<PostRecord> {
        let doc = Html::parse_document(&source.raw_content);
        let title = extract_title(&doc, &source.file_name);
        let id = make_identifier(&title, &source.file_name);

        Some(PostRecord {
            content: body_content(&source.raw_content, &doc),
            labels: extract_labels(&doc),
            title,
            id,
            source_filename: source.file_name.clone(),
        })
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// `<title>`, then the first `<h1>`, then the first `<h2>`, then the file name without extension.
pub fn extract_title(doc: &Html, file_name: &str) -> String {
    first_text(doc, &TITLE_SELECTOR)
        .or_else(|| first_text(doc, &H1_SELECTOR))
        .or_else(|| first_text(doc, &H2_SELECTOR))
        .unwrap_or_else(|| file_stem(file_name))
}

fn make_identifier(title: &str, file_name: &str) -> String {
    let id = slugify(title);
    if !id.is_empty() {
        return id;
    }

    let stem = file_stem(file_name);
    match slugify(&stem) {
        s if s.is_empty() => stem,
        s => s,
    }
}

fn body_content(raw: &str, doc: &Html) -> String {
    if BODY_TAG_REGEX.is_match(raw) {
        if let Some(body) = doc.select(&BODY_SELECTOR).next() {
            return body.inner_html();
        }
    }

    Html::parse_fragment(raw).root_element().inner_html()
}

/// Inner markup of `<body>`, or the whole document re-serialized when the
/// source has no body element.
pub fn extract_body(raw: &str) -> String {
    let doc = Html::parse_document(raw);
    body_content(raw, &doc)
}

/// Anchor texts of the first `div.post-labels` (or `div#post-labels`), in document order.
pub fn extract_labels(doc: &Html) -> Vec<String> {
    let container = doc.select(&LABELS_BY_CLASS).next()
        .or_else(|| doc.select(&LABELS_BY_ID).next());

    let Some(container) = container else {
        return vec![];
    };

    container.select(&ANCHOR_SELECTOR)
        .map(element_text)
        .filter(|label| !label.is_empty())
        .collect()
}

pub fn first_image_src(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let img = fragment.select(&IMG_SELECTOR).next()?;
    img.value().attr("src").map(|src| src.to_string())
}
