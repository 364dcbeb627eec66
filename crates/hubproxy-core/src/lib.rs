pub mod config;
pub mod logging;

pub mod error;
pub mod fetch;
pub mod guard;
pub mod handler;
pub mod mime;
pub mod resolver;
pub mod response;
pub mod rewrite;
pub mod server;

pub use error::ProxyError;
pub use handler::{ProxyHandler, ProxyRequest};
pub use response::ProxiedResponse;
