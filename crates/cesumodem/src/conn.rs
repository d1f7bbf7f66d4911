//! Inert connection metadata carried alongside transcoded wire text.
//!
//! Nothing here has behavior. A driver layered above this crate populates
//! these while it encodes outgoing text parameters and decodes incoming
//! results through the [`Transform`](crate::Transform) pair.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metadata describing the database session a transcoded stream belongs
/// to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DbConnectInfo {
    /// Name of the connected database.
    pub database_name: String,
    /// Host the session is attached to.
    pub host: String,
    /// Port the session is attached to.
    pub port: u16,
    /// Whether the session is currently connected.
    pub is_connected: bool,
}

/// Server identification reported by the remote system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServerInfo {
    /// Server software version string.
    pub version: String,
    /// Product name reported by the server.
    pub product_name: String,
}

/// Accessor surface a driver connection exposes for server metadata.
pub trait DriverConn {
    /// Server identification for this connection.
    fn server_info(&self) -> &ServerInfo;
}
