pub mod api;
pub mod config;
pub mod emitter;
pub mod error;
pub mod handlers;
pub mod image;
pub mod orchestrator;
pub mod routes;
pub mod vendor;

#[cfg(test)]
mod testing;
