//! Author profiles.
//!
//! An author wraps exactly one user (provisioned by the identity system) with
//! marketplace attributes. Deleting an author deletes every course they own.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/authors` | No | Create an author profile for a user |
//! | GET | `/api/authors` | No | List authors, newest first |
//! | GET | `/api/authors/{id}` | No | Get author by ID |
//! | PUT | `/api/authors/{id}` | No | Update bio, specialization or avatar |
//! | DELETE | `/api/authors/{id}` | No | Delete author and their courses |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AuthorService;
