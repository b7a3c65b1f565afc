// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness. No middleware beyond tracing and CORS.
pub mod auth;
pub mod health;

pub use health::health_get;
