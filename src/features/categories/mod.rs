//! Course categories.
//!
//! Categories have their own lifecycle: deleting one leaves its courses in
//! place with no category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/categories` | No | Create category |
//! | GET | `/api/categories` | No | List categories by name |
//! | GET | `/api/categories/{slug}` | No | Get category by slug |
//! | PUT | `/api/categories/{slug}` | No | Update category |
//! | DELETE | `/api/categories/{slug}` | No | Delete category, detaching its courses |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
