use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::paginator::{PageLinker, PageNaming};
use crate::post::{PostRecord, Story};
use crate::text_utils::file_slug;

const STORY_LIST_TPL: &str = r#"<div class="artikel-terbaru">Cerita Terbaru</div>
{{#cards}}
<div class="kosong"></div>
<div class="song-list">
<table width="100%">
<tbody>
<tr>
<td class="pass">
<img src="{{{thumbnail}}}">
</td>
<td valign="top">
<a href="{{{url}}}"><strong>{{{title}}}</strong></a>
<br/><br/>{{{updated}}}<br/>
<a href="{{{category_link}}}">{{{category}}}</a>
</td></tr></tbody></table></div>
{{{related}}}{{/cards}}"#;

const POST_LIST_TPL: &str = r#"{{#cards}}
<main class="container">
    <div class="post-list">
        <div class="post-card">
            <img class="post-image" src="{{{thumbnail}}}" alt="{{{alt}}}">
            <div class="post-content">
                <div class="post-meta">
                    {{#has_label}}<span class="category testing"><a href="{{{label_link}}}">{{{label}}}</a></span>{{/has_label}}
                </div>
                <h2 class="post-title"><a href="{{{link}}}">{{{title}}}</a></h2>
                <p class="post-author">By {{{author}}} · <a href="{{{link}}}">Baca Cerita</a></p>
            </div>
        </div>
    </div>
</main>
{{/cards}}"#;

const LABELS_TPL: &str = r#"{{#labels}}<span><a href="{{{link}}}">{{{name}}}</a></span> {{/labels}}"#;

pub fn label_link(labels_dir: &str, label: &str) -> String {
    PageLinker::in_folder(labels_dir, &file_slug(label), PageNaming::DashAlways).href(1)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CategoryLink {
    /// `/{category_dir}/{slug}.html`, for pages outside the category folder.
    Absolute,
    /// `{slug}.html`, for pages that already live in the category folder.
    Relative,
}

pub struct StoryLinks {
    category_dir: String,
}

impl StoryLinks {
    pub fn new(category_dir: &str) -> Self {
        StoryLinks { category_dir: category_dir.to_string() }
    }

    pub fn category_linker(&self, category: &str) -> PageLinker {
        PageLinker::in_folder(&self.category_dir, &file_slug(category), PageNaming::UnderscorePage)
    }

    pub fn absolute_category_link(&self, category: &str) -> String {
        self.category_linker(category).href(1)
    }

    pub fn category_link(&self, category: &str, kind: CategoryLink) -> String {
        match kind {
            CategoryLink::Absolute => self.absolute_category_link(category),
            CategoryLink::Relative => self.category_linker(category).file_name(1),
        }
    }
}

#[derive(ramhorns::Content)]
struct StoryList<'a> {
    cards: Vec<StoryCard<'a>>,
}

#[derive(ramhorns::Content)]
struct StoryCard<'a> {
    thumbnail: &'a str,
    url: &'a str,
    title: &'a str,
    updated: &'a str,
    category: &'a str,
    category_link: String,
    related: String,
}

#[derive(ramhorns::Content)]
pub(crate) struct PostCard<'a> {
    thumbnail: String,
    alt: &'a str,
    title: &'a str,
    link: String,
    has_label: bool,
    label: &'a str,
    label_link: String,
    author: &'a str,
}

/// Card data for one post; only the first label is shown.
pub(crate) fn post_card<'a>(post: &'a PostRecord, fallback_thumbnail: &str, labels_dir: &str, author: &'a str) -> PostCard<'a> {
    let label = post.first_label().unwrap_or_default();
    PostCard {
        thumbnail: post.thumbnail(fallback_thumbnail),
        alt: &post.title,
        title: &post.title,
        link: post.link(),
        has_label: !label.is_empty(),
        label,
        label_link: if label.is_empty() { String::new() } else { label_link(labels_dir, label) },
        author,
    }
}

#[derive(ramhorns::Content)]
struct PostCards<'a> {
    cards: Vec<PostCard<'a>>,
}

#[derive(ramhorns::Content)]
struct LabelList<'a> {
    labels: Vec<LabelItem<'a>>,
}

#[derive(ramhorns::Content)]
struct LabelItem<'a> {
    name: &'a str,
    link: String,
}

pub struct ListRenderer {
    story_template: Template<'static>,
    post_template: Template<'static>,
    labels_template: Template<'static>,
}

impl ListRenderer {
    pub fn new() -> io::Result<ListRenderer> {
        let parse = |src: &'static str| Template::new(src)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));

        Ok(ListRenderer {
            story_template: parse(STORY_LIST_TPL)?,
            post_template: parse(POST_LIST_TPL)?,
            labels_template: parse(LABELS_TPL)?,
        })
    }

    pub fn render_stories(&self, stories: &[(&Story, String)], links: &StoryLinks, kind: CategoryLink) -> String {
        let cards = stories.iter()
            .map(|(s, related)| StoryCard {
                thumbnail: &s.thumbnail,
                url: &s.url,
                title: &s.title,
                updated: &s.updated,
                category: &s.category,
                category_link: links.category_link(&s.category, kind),
                related: related.clone(),
            })
            .collect();

        self.story_template.render(&StoryList { cards })
    }

    pub fn render_posts(&self, posts: &[PostRecord], fallback_thumbnail: &str, labels_dir: &str, author: &str) -> String {
        let cards = posts.iter()
            .map(|p| PostCard {
                alt: "thumbnail",
                ..post_card(p, fallback_thumbnail, labels_dir, author)
            })
            .collect();

        self.post_template.render(&PostCards { cards })
    }

    pub fn render_labels(&self, labels: &[String], labels_dir: &str) -> String {
        let labels = labels.iter()
            .map(|l| LabelItem { name: l, link: label_link(labels_dir, l) })
            .collect();

        self.labels_template.render(&LabelList { labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_utils::slugify;

    fn story(title: &str, category: &str) -> Story {
        Story {
            title: title.to_string(),
            category: category.to_string(),
            thumbnail: "/img/t.jpg".to_string(),
            updated: "2024-02-01".to_string(),
            file_name: format!("{}.html", slugify(title)),
            url: format!("/cerita/{}.html", slugify(title)),
        }
    }

    #[test]
    fn test_category_links() {
        let links = StoryLinks::new("kategori");
        assert_eq!(links.category_link("Romance Kelam", CategoryLink::Absolute), "/kategori/romance-kelam.html");
        assert_eq!(links.category_link("Romance Kelam", CategoryLink::Relative), "romance-kelam.html");
        assert_eq!(links.category_link("!!!", CategoryLink::Absolute), "/kategori/!!!.html");
        assert_eq!(label_link("labels", "?"), "/labels/?-1.html");
    }

    #[test]
    fn test_render_stories() {
        let renderer = ListRenderer::new().unwrap();
        let links = StoryLinks::new("kategori");
        let a = story("Malam Minggu", "romance");
        let b = story("Hantu Sekolah", "horor");

        let html = renderer.render_stories(&[(&a, "<div>RELATED-A</div>".to_string()), (&b, String::new())], &links, CategoryLink::Absolute);
        assert!(html.starts_with(r#"<div class="artikel-terbaru">Cerita Terbaru</div>"#));
        assert!(html.contains(r#"<a href="/cerita/malam-minggu.html"><strong>Malam Minggu</strong></a>"#));
        assert!(html.contains("<br/><br/>2024-02-01<br/>"));
        assert!(html.contains(r#"<a href="/kategori/romance.html">romance</a>"#));
        assert!(html.contains(r#"<a href="/kategori/horor.html">horor</a>"#));
        assert_eq!(html.matches(r#"<div class="song-list">"#).count(), 2);
        let related_at = html.find("RELATED-A").unwrap();
        assert!(related_at > html.find("Malam Minggu").unwrap());
        assert!(related_at < html.find("Hantu Sekolah").unwrap());

        let html = renderer.render_stories(&[(&a, String::new())], &links, CategoryLink::Relative);
        assert!(html.contains(r#"<a href="romance.html">romance</a>"#));
    }

    #[test]
    fn test_render_posts() {
        let renderer = ListRenderer::new().unwrap();
        let posts = vec![
            PostRecord {
                title: "Kisah Satu".to_string(),
                content: r#"<img src="/img/1.jpg">"#.to_string(),
                labels: vec!["Cinta".to_string(), "Drama".to_string()],
                id: "kisah-satu".to_string(),
                source_filename: "1.html".to_string(),
            },
            PostRecord {
                title: "Kisah Dua".to_string(),
                content: String::new(),
                labels: vec![],
                id: "kisah-dua".to_string(),
                source_filename: "2.html".to_string(),
            },
        ];

        let html = renderer.render_posts(&posts, "none.jpg", "labels", "Om Sugeng");
        assert_eq!(html.matches(r#"<main class="container">"#).count(), 2);
        assert!(html.contains(r#"<img class="post-image" src="/img/1.jpg" alt="thumbnail">"#));
        assert!(html.contains(r#"<img class="post-image" src="none.jpg" alt="thumbnail">"#));
        assert!(html.contains(r#"<span class="category testing"><a href="/labels/cinta-1.html">Cinta</a></span>"#));
        assert_eq!(html.matches("category testing").count(), 1);
        assert!(html.contains(r#"<h2 class="post-title"><a href="/kisah-dua.html">Kisah Dua</a></h2>"#));
        assert!(html.contains(r#"<p class="post-author">By Om Sugeng · <a href="/kisah-satu.html">Baca Cerita</a></p>"#));
    }

    #[test]
    fn test_render_labels() {
        let renderer = ListRenderer::new().unwrap();
        let labels = vec!["Cinta Lama".to_string(), "Drama!".to_string()];
        assert_eq!(renderer.render_labels(&labels, "labels"),
                   r#"<span><a href="/labels/cinta-lama-1.html">Cinta Lama</a></span> <span><a href="/labels/drama-1.html">Drama!</a></span> "#);
        assert_eq!(renderer.render_labels(&[], "labels"), "");
    }
}
