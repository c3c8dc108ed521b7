//! Page loaders.

mod blog;
mod deals;
mod home;

pub use blog::BlogIndexPage;
pub use deals::DealsPage;
pub use home::{HomePage, HOME_POST_COUNT};
