pub mod build;
pub mod config;
pub mod content;
pub mod logger;
pub mod paginator;
pub mod post;
pub mod post_list;
pub mod template;
pub mod text_utils;
pub mod view;
#[cfg(test)]
mod test_data;
