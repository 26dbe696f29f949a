pub use dashboard::*;
pub use home::*;
pub use loaded::*;
pub use projects::*;
pub use selector::*;

mod dashboard;
mod home;
mod loaded;
mod projects;
mod selector;
