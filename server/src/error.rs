//! Startup errors for the SSR server.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid {key} value {value:?}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("leptos configuration: {0}")]
    LeptosConfig(String),
    #[error("route table invalid: {0}")]
    RouteTable(#[from] client::routes::RouteTableError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
