// Composition root for the plate event intake service.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete adapters and wire them into the ingest handler and query port.
// - Expose the HTTP router. The binary in main.rs only binds and serves it.

pub mod config;
pub mod http;
pub mod state;
