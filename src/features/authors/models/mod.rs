pub mod author;

pub use author::{author_label, Author};
