pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod strings;

pub use routes::create_router;
