pub mod extract;
pub mod router;
mod routes;
