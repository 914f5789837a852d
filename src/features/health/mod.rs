//! Liveness probes.
//!
//! Neither route touches the database; they answer as long as the process is
//! reachable.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/health` | No | Service liveness with API version |
//! | ANY | `/api/test` | No | Minimal reachability probe |

pub mod dtos;
pub mod handlers;
pub mod routes;
