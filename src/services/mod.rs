pub mod auth_service;
pub mod organisation_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthSession, Registration};
pub use organisation_service::OrganisationService;
pub use user_service::UserService;
