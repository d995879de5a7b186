pub mod fuzzy;
mod title_matcher;

pub use title_matcher::{TitleMatch, TitleMatcher};
