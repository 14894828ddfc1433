use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::paginator::PageLinker;

const STORY_NAV_TPL: &str = concat!(
    r#"<div class="pagination">"#,
    r#"{{#has_prev}}<a class="prev" href="{{{prev_href}}}">Previous</a> {{/has_prev}}"#,
    r#"{{#page_list}}{{#current}}<strong>[{{number}}]</strong> {{/current}}{{^current}}<a href="{{{href}}}">[{{number}}]</a> {{/current}}{{/page_list}}"#,
    r#"{{#has_next}}<a class="next" href="{{{next_href}}}">Next</a>{{/has_next}}"#,
    r#"</div>"#,
);

const POST_NAV_TPL: &str = concat!(
    r#"<div class="pagination-container">"#,
    r#"{{#has_prev}}<span class="pagination-link older-posts"><a href="{{{prev_href}}}">Previous Posts</a></span>{{/has_prev}}"#,
    r#"<span class="pagination-pages">{{#page_list}}{{#current}}<strong>{{number}}</strong> {{/current}}{{^current}}<a href="{{{href}}}">{{number}}</a> {{/current}}{{/page_list}}</span>"#,
    r#"{{#has_next}}<span class="pagination-link load-more"><a href="{{{next_href}}}">Load More</a></span>{{/has_next}}"#,
    r#"<span style="clear:both;"></span>"#,
    r#"</div>"#,
);

#[derive(ramhorns::Content)]
struct ViewNav {
    has_prev: bool,
    prev_href: String,
    has_next: bool,
    next_href: String,
    page_list: Vec<ViewPagination>,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: usize,
    href: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavStyle {
    /// `[N]` page numbers inside `div.pagination`.
    Story,
    /// "Previous Posts" / "Load More" inside `div.pagination-container`.
    Post,
}

pub struct PaginationRenderer {
    template: Template<'static>,
}

impl PaginationRenderer {
    pub fn new(style: NavStyle) -> io::Result<PaginationRenderer> {
        let source = match style {
            NavStyle::Story => STORY_NAV_TPL,
            NavStyle::Post => POST_NAV_TPL,
        };
        let template = Template::new(source)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing pagination template: {}", e)))?;
        Ok(PaginationRenderer { template })
    }

    pub fn render(&self, linker: &PageLinker, total_pages: usize, cur_page: usize) -> String {
        let page_list = (1..=total_pages)
            .map(|number| ViewPagination {
                current: number == cur_page,
                number,
                href: linker.href(number),
            })
            .collect();

        let has_prev = cur_page > 1;
        let has_next = cur_page < total_pages;
        self.template.render(&ViewNav {
            has_prev,
            prev_href: if has_prev { linker.href(cur_page - 1) } else { String::new() },
            has_next,
            next_href: if has_next { linker.href(cur_page + 1) } else { String::new() },
            page_list,
        })
    }
}
