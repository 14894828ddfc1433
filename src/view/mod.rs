pub mod list_renderer;
pub mod page_shell;
pub mod pagination_renderer;
pub mod related_renderer;
