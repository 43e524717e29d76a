mod list;
mod parse;

pub use list::{list, ListOptions, Source};
pub use parse::parse;
