pub mod user_get;

pub use user_get::user_get;
