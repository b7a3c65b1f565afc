// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind jwt_auth_middleware, so handlers can take
// `Extension<AuthUser>` and trust it.
pub mod organisations; // /api/organisations[/:orgId[/users]]
pub mod users;         // /api/users/:id
