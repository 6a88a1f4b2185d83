// Infrastructure: gRPC transport and its configuration

pub mod server;

pub use server::{start_server, ServerArgs, ServerConfig};
