//! Small helpers shared by the content pipeline, the views and the commands

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
