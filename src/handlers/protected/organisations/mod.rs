pub mod member_add;
pub mod organisation_create;
pub mod organisation_get;
pub mod organisation_list;

pub use member_add::member_add_post;
pub use organisation_create::organisation_create_post;
pub use organisation_get::organisation_get;
pub use organisation_list::organisation_list_get;
