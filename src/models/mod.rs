pub use project::*;
pub use project_status::*;
pub use site_content::*;

mod nullable;
mod project;
mod project_status;
mod site_content;
