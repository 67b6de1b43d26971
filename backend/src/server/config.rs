//! HTTP server configuration object.

use std::net::SocketAddr;

use hbnb::domain::Storage;

/// Everything the server needs once storage has been opened.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage: Storage) -> Self {
        Self { bind_addr, storage }
    }
}
