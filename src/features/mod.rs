pub mod authors;
pub mod categories;
pub mod courses;
pub mod health;
