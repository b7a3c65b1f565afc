// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. Both endpoints answer with
// `{ accessToken, user }` on success.
pub mod login;    // POST /auth/login
pub mod register; // POST /auth/register
pub mod utils;

pub use login::login_post;
pub use register::register_post;
