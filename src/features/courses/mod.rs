//! Courses.
//!
//! A course belongs to one author and at most one category. Its rating,
//! review count and student count are maintained by the review and enrollment
//! endpoints rather than written directly.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/courses` | No | Create course |
//! | GET | `/api/courses` | No | List with filters, search and sorting |
//! | GET | `/api/courses/{slug}` | No | Get course by slug |
//! | PUT | `/api/courses/{slug}` | No | Update course |
//! | DELETE | `/api/courses/{slug}` | No | Delete course |
//! | POST | `/api/courses/{slug}/reviews` | No | Record a 1-5 review score |
//! | POST | `/api/courses/{slug}/enrollments` | No | Count an enrolled student |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CourseService;
