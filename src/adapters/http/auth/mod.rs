//! Auth HTTP endpoints: sign-in, sign-out, session state and the rendered screen.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::SharedShell;
pub use routes::auth_routes;
