pub mod course_handler;

pub use course_handler::*;
