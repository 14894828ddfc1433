//! Category mode: stories described by `<meta>` tags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::{info, warn};

use crate::build::output::write_page;
use crate::build::{group_by, BuildSummary};
use crate::config::Config;
use crate::content::html_extract::extract_body;
use crate::content::load_records;
use crate::content::meta_extract::MetaExtractor;
use crate::paginator::{PageLinker, PageNaming, Paginator};
use crate::post::Story;
use crate::template::SiteFragments;
use crate::view::list_renderer::{CategoryLink, ListRenderer, StoryLinks};
use crate::view::page_shell::{is_wrapped, PageShell};
use crate::view::pagination_renderer::{NavStyle, PaginationRenderer};
use crate::view::related_renderer::{related_stories, RelatedRenderer};

const INDEX_BASE_NAME: &str = "index";
const INDEX_TITLE: &str = "Index Cerita";

/// Every story in the stories folder, latest `updated` first. Stories with the
/// same `updated` value keep folder order.
pub fn parse_stories(config: &Config) -> io::Result<Vec<Story>> {
    let extractor = MetaExtractor::new(&config.paths.stories_dir);
    let mut stories = load_records(&extractor, &config.paths.stories_path())?;
    stories.sort_by(|a, b| b.updated.cmp(&a.updated));
    Ok(stories)
}

pub struct StorySite<'a> {
    config: &'a Config,
    shell: PageShell<'a>,
    list: ListRenderer,
    related: RelatedRenderer,
    nav: PaginationRenderer,
    links: StoryLinks,
}

impl<'a> StorySite<'a> {
    pub fn new(config: &'a Config, fragments: &'a SiteFragments) -> io::Result<StorySite<'a>> {
        Ok(StorySite {
            config,
            shell: PageShell::new(fragments, &config.site.language)?,
            list: ListRenderer::new()?,
            related: RelatedRenderer::new()?,
            nav: PaginationRenderer::new(NavStyle::Story)?,
            links: StoryLinks::new(&config.paths.category_dir),
        })
    }

    fn render_listing(&self, page: &[Story], pool: &[Story], kind: CategoryLink) -> String {
        let cards: Vec<(&Story, String)> = page.iter()
            .map(|story| {
                let related = related_stories(pool, story, self.config.site.story_related_limit);
                (story, self.related.render_stories(&related, &self.links))
            })
            .collect();

        self.list.render_stories(&cards, &self.links, kind)
    }

    fn build_listing(&self, items: &[Story], linker: &PageLinker, kind: CategoryLink,
                     title: &str, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let paginator = Paginator::from(items, self.config.site.story_page_size);
        let mut written = vec![];

        for (page_number, page) in paginator.pages() {
            let mut content = self.render_listing(page, items, kind);
            content.push_str(&self.nav.render(linker, paginator.page_count(), page_number));
            let html = self.shell.wrap(title, &content);

            let path = out_dir.join(linker.file_name(page_number));
            write_page(&path, &html).with_context(|| format!("Writing listing page {}", path.display()))?;
            written.push(path);
        }

        Ok(written)
    }

    /// `index.html`, `index_page2.html`, ... at the site root.
    pub fn build_index(&self, stories: &[Story]) -> Result<Vec<PathBuf>> {
        let linker = PageLinker::root(INDEX_BASE_NAME, PageNaming::UnderscorePage);
        self.build_listing(stories, &linker, CategoryLink::Absolute, INDEX_TITLE, &self.config.paths.root_dir)
    }

    pub fn build_categories(&self, stories: &[Story]) -> Result<Vec<PathBuf>> {
        let out_dir = self.config.paths.category_path();
        let mut written = vec![];

        for (category, items) in group_by(stories, |s| vec![s.category.clone()]) {
            let linker = self.links.category_linker(&category);
            let title = format!("Kategori: {}", category);
            written.extend(self.build_listing(&items, &linker, CategoryLink::Relative, &title, &out_dir)?);
        }

        Ok(written)
    }

    fn wrap_story(&self, story: &Story, path: &Path) -> io::Result<bool> {
        let raw = fs::read_to_string(path)?;
        if is_wrapped(&raw) {
            return Ok(false);
        }

        let html = self.shell.wrap_story(story, &extract_body(&raw));
        write_page(path, &html)?;
        Ok(true)
    }

    /// Rewrites each story file with its body inside the site chrome. Files
    /// that are gone, already wrapped or fail are skipped.
    pub fn wrap_story_pages(&self, stories: &[Story]) -> (Vec<PathBuf>, Vec<PathBuf>) {
        info!("Wrapping {} story files in {}", stories.len(), self.config.paths.stories_path().display());
        let mut wrapped = vec![];
        let mut skipped = vec![];

        for story in stories {
            let path = self.config.paths.stories_path().join(&story.file_name);
            if !path.exists() {
                warn!("File {} not found, skipping", path.display());
                skipped.push(path);
                continue;
            }

            match self.wrap_story(story, &path) {
                Ok(true) => {
                    info!("Wrapped {}", path.display());
                    wrapped.push(path);
                }
                Ok(false) => {
                    info!("{} is already wrapped, leaving it untouched", path.display());
                    skipped.push(path);
                }
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    skipped.push(path);
                }
            }
        }

        (wrapped, skipped)
    }
}

pub fn build_story_site(config: &Config) -> Result<BuildSummary> {
    let fragments = SiteFragments::load(&config.paths.custom_path())
        .context("Loading custom site fragments")?;
    let site = StorySite::new(config, &fragments)?;

    let stories = parse_stories(config)
        .with_context(|| format!("Reading stories from {}", config.paths.stories_path().display()))?;
    info!("Stories read: {}", stories.len());

    let mut listing_pages = site.build_index(&stories)?;
    listing_pages.extend(site.build_categories(&stories)?);
    info!("Listing pages written: {}", listing_pages.len());

    let (article_pages, skipped_articles) = site.wrap_story_pages(&stories);

    Ok(BuildSummary {
        records: stories.len(),
        listing_pages,
        article_pages,
        skipped_articles,
    })
}
