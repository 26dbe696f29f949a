pub use client::*;
pub use projects::*;
pub use query::*;
pub use site_content::*;

mod client;
mod projects;
mod query;
mod site_content;
