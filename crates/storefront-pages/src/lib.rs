//! Storefront pages backed by CMS content.
//!
//! A page loads its data through the query functions, then hands it to a
//! [`Presentation`] to build output. Loading never filters or reshapes the
//! query results, and fetch errors reach the caller unchanged.
//!
//! - **Pages**: `DealsPage`, `HomePage`, `BlogIndexPage`
//! - **Presentation**: the component boundary (`container`, `title`,
//!   `product_grid`, `variant_list`, `blog_list`)
//! - **HTML**: `HtmlPresentation` renders the components as HTML strings

pub mod html;
pub mod pages;
pub mod presentation;

pub use html::{document, html_escape, HtmlPresentation};
pub use pages::{BlogIndexPage, DealsPage, HomePage, HOME_POST_COUNT};
pub use presentation::Presentation;
