use std::io;
use std::io::ErrorKind;

use rand::Rng;
use rand::seq::SliceRandom;
use ramhorns::Template;

use crate::post::{PostRecord, Story};
use crate::view::list_renderer::{post_card, PostCard, StoryLinks};

const STORY_RELATED_TPL: &str = r#"<div class="related-posts"><h3>Baca Juga</h3>
{{#cards}}
<div class="kosong"></div>
<div class="song-list related-item">
<table width="100%">
<tbody>
<tr>
<td class="pass">
<img src="{{{thumbnail}}}">
</td>
<td valign="top">
<a href="{{{url}}}"><strong>{{{title}}}</strong></a>
<br/><br/>
<a href="{{{category_link}}}">{{{category}}}</a>
</td></tr></tbody></table></div>
{{/cards}}
</div>
"#;

const POST_RELATED_TPL: &str = r#"
    <main class="container">
        <div class="post-list">
{{#cards}}
            <div class="post-card">
                <img class="post-image" src="{{{thumbnail}}}" alt="{{{title}}}">
                <div class="post-content">
                    <div class="post-meta">
                        {{#has_label}}<span class="category testing"><a href="{{{label_link}}}">{{{label}}}</a></span>{{/has_label}}
                    </div>
                    <h2 class="post-title"><a href="{{{link}}}">{{{title}}}</a></h2>
                    <p class="post-author">By {{{author}}} · <a href="{{{link}}}">Baca Cerita</a></p>
                </div>
            </div>
{{/cards}}
        </div>
    </main>
"#;

pub const NO_RELATED_POSTS: &str = "<p>No related posts found.</p>";

pub fn related_stories<'a>(pool: &'a [Story], current: &Story, limit: usize) -> Vec<&'a Story> {
    pool.iter()
        .filter(|s| s.category == current.category && s.url != current.url)
        .take(limit)
        .collect()
}

/// Up to `limit` posts sharing a label with `current`, sampled without
/// replacement. `current` itself is never picked.
pub fn related_posts<'a, R: Rng + ?Sized>(all: &'a [PostRecord], current: &PostRecord, limit: usize, rng: &mut R) -> Vec<&'a PostRecord> {
    let eligible: Vec<&PostRecord> = all.iter()
        .filter(|p| p.id != current.id && p.shares_label_with(current))
        .collect();

    eligible.choose_multiple(rng, limit.min(eligible.len()))
        .copied()
        .collect()
}

#[derive(ramhorns::Content)]
struct StoryRelated<'a> {
    cards: Vec<StoryRelatedCard<'a>>,
}

#[derive(ramhorns::Content)]
struct StoryRelatedCard<'a> {
    thumbnail: &'a str,
    url: &'a str,
    title: &'a str,
    category: &'a str,
    category_link: String,
}

#[derive(ramhorns::Content)]
struct PostRelated<'a> {
    cards: Vec<PostCard<'a>>,
}

pub struct RelatedRenderer {
    story_template: Template<'static>,
    post_template: Template<'static>,
}

impl RelatedRenderer {
    pub fn new() -> io::Result<RelatedRenderer> {
        let parse = |src: &'static str| Template::new(src)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing related posts template: {}", e)));

        Ok(RelatedRenderer {
            story_template: parse(STORY_RELATED_TPL)?,
            post_template: parse(POST_RELATED_TPL)?,
        })
    }

    /// Empty when there is nothing related.
    pub fn render_stories(&self, related: &[&Story], links: &StoryLinks) -> String {
        if related.is_empty() {
            return String::new();
        }

        let cards = related.iter()
            .map(|s| StoryRelatedCard {
                thumbnail: &s.thumbnail,
                url: &s.url,
                title: &s.title,
                category: &s.category,
                category_link: links.absolute_category_link(&s.category),
            })
            .collect();

        self.story_template.render(&StoryRelated { cards })
    }

    pub fn render_posts(&self, related: &[&PostRecord], fallback_thumbnail: &str, labels_dir: &str, author: &str) -> String {
        if related.is_empty() {
            return NO_RELATED_POSTS.to_string();
        }

        let cards = related.iter()
            .map(|p| post_card(p, fallback_thumbnail, labels_dir, author))
            .collect();

        self.post_template.render(&PostRelated { cards })
    }
}
