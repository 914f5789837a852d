pub mod author_handler;

pub use author_handler::*;
