use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

pub mod output;
pub mod post_site;
pub mod story_site;

#[derive(Debug, Default)]
pub struct BuildSummary {
    pub records: usize,
    pub listing_pages: Vec<PathBuf>,
    pub article_pages: Vec<PathBuf>,
    pub skipped_articles: Vec<PathBuf>,
}

/// Groups `items` under every key returned by `keys`. Groups keep the order in
/// which their key first shows up, items keep collection order.
pub fn group_by<T: Clone, F>(items: &[T], keys: F) -> Vec<(String, Vec<T>)>
    where F: Fn(&T) -> Vec<String>
{
    let mut groups: Vec<(String, Vec<T>)> = vec![];
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in items {
        for key in keys(item) {
            let pos = *positions.entry(key.clone()).or_insert_with(|| {
                groups.push((key, vec![]));
                groups.len() - 1
            });
            groups[pos].1.push(item.clone());
        }
    }

    groups
}

pub fn build_all(config: &Config) -> Result<(BuildSummary, BuildSummary)> {
    let stories = story_site::build_story_site(config)?;
    let posts = post_site::build_post_site(config)?;
    Ok((stories, posts))
}
