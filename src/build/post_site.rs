//! Label mode: title and labels are inferred from the markup.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spdlog::{info, warn};

use crate::build::output::{write_json, write_page};
use crate::build::{group_by, BuildSummary};
use crate::config::Config;
use crate::content::html_extract::HtmlExtractor;
use crate::content::load_records;
use crate::paginator::{PageLinker, PageNaming, Paginator};
use crate::post::PostRecord;
use crate::template::{read_template, render, SiteFragments, TemplateContext};
use crate::text_utils::file_slug;
use crate::view::list_renderer::ListRenderer;
use crate::view::pagination_renderer::{NavStyle, PaginationRenderer};
use crate::view::related_renderer::{related_posts, RelatedRenderer};

const INDEX_BASE_NAME: &str = "index";
const POSTS_JSON: &str = "posts.json";

pub struct PostTemplates {
    pub index: String,
    pub post: String,
    pub label: String,
}

impl PostTemplates {
    pub const INDEX: &'static str = "index_template.html";
    pub const POST: &'static str = "post_template.html";
    pub const LABEL: &'static str = "label_template.html";

    pub fn load(tpl_dir: &Path) -> io::Result<PostTemplates> {
        Ok(PostTemplates {
            index: read_template(tpl_dir, Self::INDEX)?,
            post: read_template(tpl_dir, Self::POST)?,
            label: read_template(tpl_dir, Self::LABEL)?,
        })
    }
}

pub fn fetch_posts(config: &Config) -> io::Result<Vec<PostRecord>> {
    let mut posts = load_records(&HtmlExtractor, &config.paths.posts_path())?;
    posts.sort_by(|a, b| b.source_filename.cmp(&a.source_filename));
    Ok(posts)
}

pub struct PostSite<'a> {
    config: &'a Config,
    templates: PostTemplates,
    fragments: &'a SiteFragments,
    list: ListRenderer,
    related: RelatedRenderer,
    nav: PaginationRenderer,
}

impl<'a> PostSite<'a> {
    pub fn new(config: &'a Config, templates: PostTemplates, fragments: &'a SiteFragments) -> io::Result<PostSite<'a>> {
        Ok(PostSite {
            config,
            templates,
            fragments,
            list: ListRenderer::new()?,
            related: RelatedRenderer::new()?,
            nav: PaginationRenderer::new(NavStyle::Post)?,
        })
    }

    fn labels_dir(&self) -> &str {
        &self.config.paths.labels_dir
    }

    fn render_post_page<R: Rng + ?Sized>(&self, post: &PostRecord, all: &[PostRecord], rng: &mut R) -> String {
        let site = &self.config.site;
        let related = related_posts(all, post, site.post_related_limit, rng);
        let related_html = self.related.render_posts(&related, &site.fallback_thumbnail, self.labels_dir(), &site.author);

        let context = TemplateContext::new()
            .with("title", post.title.as_str())
            .with("content", post.content.as_str())
            .with("labels", self.list.render_labels(&post.labels, self.labels_dir()))
            .with("related", related_html)
            .with("site_title", site.title.as_str());

        render(&self.templates.post, &self.fragments.fill(context))
    }

    /// One `{id}.html` per post at the site root. A failed write is logged and
    /// the post is skipped; posts with the same identifier overwrite each other.
    pub fn build_post_pages<R: Rng + ?Sized>(&self, posts: &[PostRecord], rng: &mut R) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut written = vec![];
        let mut skipped = vec![];

        for post in posts {
            let path = self.config.paths.root_dir.join(post.output_file_name());
            let html = self.render_post_page(post, posts, rng);
            match write_page(&path, &html) {
                Ok(_) => written.push(path),
                Err(e) => {
                    warn!("Error writing post {}: {}", post.source_filename, e);
                    skipped.push(path);
                }
            }
        }

        (written, skipped)
    }

    fn build_listing(&self, items: &[PostRecord], linker: &PageLinker, template: &str,
                     extra: TemplateContext, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let site = &self.config.site;
        let paginator = Paginator::from(items, site.post_page_size);
        let mut written = vec![];

        for (page_number, page) in paginator.pages() {
            let context = extra.clone()
                .with("site_title", site.title.as_str())
                .with("items", self.list.render_posts(page, &site.fallback_thumbnail, self.labels_dir(), &site.author))
                .with("pagination", self.nav.render(linker, paginator.page_count(), page_number));
            let html = render(template, &self.fragments.fill(context));

            let path = out_dir.join(linker.file_name(page_number));
            write_page(&path, &html).with_context(|| format!("Writing listing page {}", path.display()))?;
            written.push(path);
        }

        Ok(written)
    }

    pub fn build_index(&self, posts: &[PostRecord]) -> Result<Vec<PathBuf>> {
        let linker = PageLinker::root(INDEX_BASE_NAME, PageNaming::DashAfterFirst).with_root_first_page();
        self.build_listing(posts, &linker, &self.templates.index, TemplateContext::new(), &self.config.paths.root_dir)
    }

    /// `{label}-1.html`, `{label}-2.html`, ... in the labels folder, one
    /// listing per label in order of first appearance.
    pub fn build_label_pages(&self, posts: &[PostRecord]) -> Result<Vec<PathBuf>> {
        let out_dir = self.config.paths.labels_path();
        let mut written = vec![];

        for (label, items) in group_by(posts, |p| p.labels.clone()) {
            let linker = PageLinker::in_folder(self.labels_dir(), &file_slug(&label), PageNaming::DashAlways);
            let extra = TemplateContext::new().with("label", label.as_str());
            written.extend(self.build_listing(&items, &linker, &self.templates.label, extra, &out_dir)?);
        }

        Ok(written)
    }
}

fn related_rng(config: &Config) -> StdRng {
    match config.site.related_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn build_post_site(config: &Config) -> Result<BuildSummary> {
    let fragments = SiteFragments::load(&config.paths.custom_path())
        .context("Loading custom site fragments")?;
    let templates = PostTemplates::load(&config.paths.template_path())
        .context("Loading post templates")?;
    let site = PostSite::new(config, templates, &fragments)?;

    let posts = fetch_posts(config)
        .with_context(|| format!("Reading posts from {}", config.paths.posts_path().display()))?;
    info!("Posts read: {}", posts.len());

    let json_path = config.paths.data_path().join(POSTS_JSON);
    write_json(&json_path, &posts).with_context(|| format!("Writing {}", json_path.display()))?;

    let mut rng = related_rng(config);
    let (article_pages, skipped_articles) = site.build_post_pages(&posts, &mut rng);
    info!("Post pages written: {}", article_pages.len());

    let mut listing_pages = site.build_index(&posts)?;
    listing_pages.extend(site.build_label_pages(&posts)?);
    info!("Listing pages written: {}", listing_pages.len());

    Ok(BuildSummary {
        records: posts.len(),
        listing_pages,
        article_pages,
        skipped_articles,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use serde_json::Value;

    use super::*;
    use crate::test_data::{post_html, POST_DATA_HTML};

    const POST_TPL: &str = "<html><head>{{ custom_head }}<title>{{ title }}</title></head><body>{{ custom_header }}\
<h1>{{ title }}</h1>{{ content }}<div class=\"labels\">{{ labels }}</div><div class=\"related\">{{ related }}</div>\
{{ custom_sidebar }}{{ custom_footer }}</body></html>";
    const INDEX_TPL: &str = "<html><head><title>{{ site_title }}</title></head><body>{{ items }}{{ pagination }}</body></html>";
    const LABEL_TPL: &str = "<html><head><title>{{ label }} - {{ site_title }}</title></head><body>{{ items }}{{ pagination }}</body></html>";

    fn setup_site(root: &Path) -> Config {
        let mut config = Config::default();
        config.paths.root_dir = root.to_path_buf();
        config.site.related_seed = Some(3);

        let custom = config.paths.custom_path();
        fs::create_dir_all(&custom).unwrap();
        fs::write(custom.join(SiteFragments::HEAD), "<meta name=\"x\" content=\"y\">").unwrap();
        fs::write(custom.join(SiteFragments::JS), "<script src=\"/a.js\"></script>").unwrap();
        fs::write(custom.join(SiteFragments::HEADER), "<header>HEADER</header>").unwrap();
        fs::write(custom.join(SiteFragments::FOOTER), "<footer>FOOTER</footer>").unwrap();

        let templates = config.paths.template_path();
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join(PostTemplates::POST), POST_TPL).unwrap();
        fs::write(templates.join(PostTemplates::INDEX), INDEX_TPL).unwrap();
        fs::write(templates.join(PostTemplates::LABEL), LABEL_TPL).unwrap();

        fs::create_dir_all(config.paths.posts_path()).unwrap();
        config
    }

    fn add_post(config: &Config, file_name: &str, content: &str) {
        fs::write(config.paths.posts_path().join(file_name), content).unwrap();
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
    }

    fn card_count(html: &str) -> usize {
        html.matches(r#"<div class="post-card">"#).count()
    }

    #[test]
    fn test_post_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "2024-05-01-kisah.html", POST_DATA_HTML);

        let summary = build_post_site(&config).unwrap();
        assert_eq!(summary.records, 1);

        let page = read(dir.path().join("kisah-cinta-di-malam-hari.html"));
        assert!(page.contains("<title>Kisah Cinta di Malam Hari</title>"));
        assert!(page.contains(r#"<img src="/img/malam.jpg">"#));
        assert!(page.contains(r#"<meta name="x" content="y"><script src="/a.js"></script>"#));
        assert!(page.contains("HEADER") && page.contains("FOOTER"));
        assert!(page.contains(r#"<span><a href="/labels/cinta-1.html">Cinta</a></span> <span><a href="/labels/drama-1.html">Drama</a></span>"#));
        assert!(page.contains(r#"<div class="related"><p>No related posts found.</p></div>"#));
        assert!(!page.contains("{{ custom_sidebar }}"));

        let label = read(config.paths.labels_path().join("cinta-1.html"));
        assert!(label.contains("<title>Cinta - Blog Om Sugeng</title>"));
        assert!(label.contains(r#"<a href="/kisah-cinta-di-malam-hari.html">Kisah Cinta di Malam Hari</a>"#));
        assert!(config.paths.labels_path().join("drama-1.html").exists());
    }

    #[test]
    fn test_index_and_label_pagination() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = setup_site(dir.path());
        config.site.post_page_size = 4;
        for n in 1..=9 {
            let labels: &[&str] = if n % 3 == 0 { &["Horor", "Cinta"] } else { &["Cinta"] };
            add_post(&config, &format!("{:02}.html", n), &post_html(&format!("Kisah {}", n), labels));
        }

        let summary = build_post_site(&config).unwrap();
        assert_eq!(summary.records, 9);
        assert_eq!(summary.article_pages.len(), 9);

        let index1 = read(dir.path().join("index.html"));
        let index2 = read(dir.path().join("index-2.html"));
        let index3 = read(dir.path().join("index-3.html"));
        assert!(!dir.path().join("index-1.html").exists());
        assert_eq!((card_count(&index1), card_count(&index2), card_count(&index3)), (4, 4, 1));
        // Newest source file first.
        assert!(index1.find("Kisah 9").unwrap() < index1.find("Kisah 8").unwrap());
        assert!(index2.contains(r#"<a href="/">Previous Posts</a>"#));
        assert!(index2.contains(r#"<a href="/index-3.html">Load More</a>"#));
        assert!(!index1.contains("Previous Posts"));
        assert!(!index3.contains("Load More"));

        let labels = config.paths.labels_path();
        assert_eq!(card_count(&read(labels.join("cinta-1.html"))), 4);
        assert_eq!(card_count(&read(labels.join("cinta-3.html"))), 1);
        assert_eq!(card_count(&read(labels.join("horor-1.html"))), 3);
        assert!(!labels.join("horor-2.html").exists());
        assert!(read(labels.join("cinta-2.html")).contains(r#"<a href="/labels/cinta-1.html">Previous Posts</a>"#));
    }

    #[test]
    fn test_related_posts_share_a_label() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "a.html", &post_html("Alpha", &["Cinta"]));
        add_post(&config, "b.html", &post_html("Beta", &["Cinta", "Drama"]));
        add_post(&config, "c.html", &post_html("Gamma", &["Drama"]));
        add_post(&config, "d.html", &post_html("Delta", &["Horor"]));

        build_post_site(&config).unwrap();

        let related_titles = |file: &str| -> HashSet<&'static str> {
            let page = read(dir.path().join(file));
            let related = &page[page.find(r#"<div class="related">"#).unwrap()..];
            ["Alpha", "Beta", "Gamma", "Delta"].into_iter()
                .filter(|t| related.contains(&format!(">{}</a></h2>", t)))
                .collect()
        };

        assert_eq!(related_titles("alpha.html"), HashSet::from(["Beta"]));
        assert_eq!(related_titles("beta.html"), HashSet::from(["Alpha", "Gamma"]));
        assert_eq!(related_titles("gamma.html"), HashSet::from(["Beta"]));
        assert!(related_titles("delta.html").is_empty());
        assert!(read(dir.path().join("delta.html")).contains("<p>No related posts found.</p>"));
    }

    #[test]
    fn test_posts_json_dump() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "a.html", &post_html("Alpha", &["Cinta"]));
        add_post(&config, "b.html", &post_html("Beta", &[]));

        build_post_site(&config).unwrap();
        let json: Value = serde_json::from_str(&read(config.paths.data_path().join(POSTS_JSON))).unwrap();
        let posts = json.as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["id"], "beta");
        assert_eq!(posts[0]["source_filename"], "b.html");
        assert_eq!(posts[1]["labels"], serde_json::json!(["Cinta"]));
        assert!(posts[1]["content"].as_str().unwrap().contains("<p>Isi Alpha.</p>"));
    }

    #[test]
    fn test_duplicate_identifier_keeps_later_post() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "a.html", &post_html("Kisah Sama", &["Cinta"]));
        add_post(&config, "b.html", &post_html("kisah sama!", &["Cinta"]));

        let summary = build_post_site(&config).unwrap();
        assert_eq!(summary.records, 2);

        let pages: Vec<String> = fs::read_dir(dir.path()).unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".html") && name != "index.html")
            .collect();
        assert_eq!(pages, ["kisah-sama.html"]);

        // b.html sorts first, so a.html is written last.
        let page = read(dir.path().join("kisah-sama.html"));
        assert!(page.contains("<p>Isi Kisah Sama.</p>"));
        assert!(!page.contains("<p>Isi kisah sama!.</p>"));
    }

    #[test]
    fn test_symbol_only_label_keeps_its_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "a.html", &post_html("Alpha", &["?!"]));

        build_post_site(&config).unwrap();
        assert!(config.paths.labels_path().join("?!-1.html").exists());
        assert!(!config.paths.labels_path().join("-1.html").exists());
        assert!(read(dir.path().join("alpha.html")).contains(r#"<a href="/labels/?!-1.html">?!</a>"#));
    }

    #[test]
    fn test_missing_body_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        add_post(&config, "a.html", &post_html("Alpha", &["Cinta"]));
        fs::remove_file(config.paths.template_path().join(PostTemplates::LABEL)).unwrap();

        let err = build_post_site(&config).unwrap_err();
        assert!(format!("{:#}", err).contains(PostTemplates::LABEL));
        assert!(!dir.path().join("alpha.html").exists());
        assert!(!config.paths.data_path().exists());
    }

    #[test]
    fn test_no_posts() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup_site(dir.path());
        fs::remove_dir(config.paths.posts_path()).unwrap();

        let summary = build_post_site(&config).unwrap();
        assert_eq!(summary.records, 0);
        assert!(summary.listing_pages.is_empty());
        assert!(!dir.path().join("index.html").exists());
        assert_eq!(read(config.paths.data_path().join(POSTS_JSON)).trim(), "[]");
    }
}
