pub mod membership;
pub mod organisation;
pub mod user;

pub use membership::Membership;
pub use organisation::{NewOrganisation, Organisation};
pub use user::{NewUser, User, UserProfile};
