use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Story;
use crate::template::SiteFragments;

/// Written into every page assembled by [`PageShell`]; a story file carrying it
/// has already been wrapped.
pub const WRAPPED_MARKER: &str = "<!-- storysite:wrapped -->";

const SHELL_TPL: &str = r#"<!DOCTYPE html>
{{{marker}}}
<html lang="{{lang}}">
<head itemscope itemtype="https://schema.org/WebSite">
  <title>{{{title}}}</title>
{{{head}}}
{{#meta}}<meta name="{{name}}" content="{{content}}">
{{/meta}}</head>
<body itemscope itemtype="https://schema.org/WebPage">
<div class="site-container">
{{{header}}}
{{{body}}}
{{{footer}}}
</div>
</body>
</html>"#;

#[derive(ramhorns::Content)]
struct ViewShell<'a> {
    marker: &'a str,
    lang: &'a str,
    title: &'a str,
    meta: Vec<ViewMeta<'a>>,
    head: &'a str,
    header: &'a str,
    body: &'a str,
    footer: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewMeta<'a> {
    name: &'a str,
    content: &'a str,
}

pub fn is_wrapped(raw: &str) -> bool {
    raw.contains(WRAPPED_MARKER)
}

pub struct PageShell<'a> {
    template: Template<'static>,
    fragments: &'a SiteFragments,
    lang: String,
}

impl<'a> PageShell<'a> {
    pub fn new(fragments: &'a SiteFragments, lang: &str) -> io::Result<PageShell<'a>> {
        let template = Template::new(SHELL_TPL)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page shell template: {}", e)))?;

        Ok(PageShell {
            template,
            fragments,
            lang: lang.to_string(),
        })
    }

    pub fn wrap(&self, title: &str, body: &str) -> String {
        self.render(title, body, vec![])
    }

    /// Story meta tags go after the custom head so they win on the next run.
    pub fn wrap_story(&self, story: &Story, body: &str) -> String {
        let meta = vec![
            ViewMeta { name: "title", content: &story.title },
            ViewMeta { name: "category", content: &story.category },
            ViewMeta { name: "thumbnail", content: &story.thumbnail },
            ViewMeta { name: "updated", content: &story.updated },
        ];
        self.render(&story.title, body, meta)
    }

    fn render(&self, title: &str, body: &str, meta: Vec<ViewMeta>) -> String {
        self.template.render(&ViewShell {
            marker: WRAPPED_MARKER,
            lang: &self.lang,
            title,
            meta,
            head: &self.fragments.head,
            header: &self.fragments.header,
            body,
            footer: &self.fragments.footer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::meta_extract::meta_tags;

    fn fragments() -> SiteFragments {
        SiteFragments {
            head: "<link rel=\"stylesheet\" href=\"/style.css\">".to_string(),
            js: String::new(),
            header: "<header>HEADER</header>".to_string(),
            sidebar: String::new(),
            footer: "<footer>FOOTER</footer>".to_string(),
        }
    }

    #[test]
    fn test_wrap() {
        let fragments = fragments();
        let shell = PageShell::new(&fragments, "id").unwrap();
        let page = shell.wrap("Index Cerita", "<p>BODY</p>");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(is_wrapped(&page));
        assert!(page.contains(r#"<html lang="id">"#));
        assert!(page.contains("<title>Index Cerita</title>"));
        assert!(page.contains(r#"<link rel="stylesheet" href="/style.css">"#));
        assert!(!page.contains("<meta name="));

        let header_at = page.find("HEADER").unwrap();
        let body_at = page.find("<p>BODY</p>").unwrap();
        let footer_at = page.find("FOOTER").unwrap();
        assert!(page.find(r#"<div class="site-container">"#).unwrap() < header_at);
        assert!(header_at < body_at && body_at < footer_at);
    }

    #[test]
    fn test_wrap_story_keeps_metadata() {
        let fragments = fragments();
        let shell = PageShell::new(&fragments, "id").unwrap();
        let story = Story {
            title: "Kopi Pahit & Manis".to_string(),
            category: "romance".to_string(),
            thumbnail: "/img/kopi.jpg".to_string(),
            updated: "2024-04-01".to_string(),
            file_name: "kopi.html".to_string(),
            url: "/cerita/kopi.html".to_string(),
        };
        let page = shell.wrap_story(&story, "<p>isi</p>");

        let meta = meta_tags(&page);
        assert_eq!(meta.get("title"), Some(&story.title));
        assert_eq!(meta.get("category"), Some(&story.category));
        assert_eq!(meta.get("thumbnail"), Some(&story.thumbnail));
        assert_eq!(meta.get("updated"), Some(&story.updated));
        assert!(is_wrapped(&page));
    }

    #[test]
    fn test_story_meta_wins_over_custom_head() {
        let mut fragments = fragments();
        fragments.head = r#"<meta name="title" content="Blog Om Sugeng"><meta name="category" content="umum">"#.to_string();
        let shell = PageShell::new(&fragments, "id").unwrap();
        let story = Story {
            title: "Malam".to_string(),
            category: "romance".to_string(),
            thumbnail: String::new(),
            updated: "2024-01-01".to_string(),
            file_name: "malam.html".to_string(),
            url: "/cerita/malam.html".to_string(),
        };

        let meta = meta_tags(&shell.wrap_story(&story, "<p>isi</p>"));
        assert_eq!(meta.get("title").map(|s| s.as_str()), Some("Malam"));
        assert_eq!(meta.get("category").map(|s| s.as_str()), Some("romance"));
    }

    #[test]
    fn test_is_wrapped() {
        assert!(!is_wrapped("<html><body><p>raw</p></body></html>"));
    }
}
