// ABOUTME: Page rendering module for panelkit
// ABOUTME: Composes page content with layouts and answers HTMX requests with fragments

pub mod layout;
pub mod options;
pub mod page;
pub mod request;

pub use layout::{page_file_name, MainLayoutPage, DEFAULT_LAYOUT, SIDEBAR_PARTIAL, SIDEBAR_TEMPLATE};
pub use options::{LayoutMode, PageOptions, RenderControl, FULL_LAYOUT_KEY, MAIN_LAYOUT_KEY};
pub use page::PageContent;
pub use request::{is_partial_request, HeaderLookup, HX_REQUEST};
