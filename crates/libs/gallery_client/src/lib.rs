#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod gateway;
mod graphql;
mod storage;

pub use gateway::GraphqlGateway;
pub use storage::HttpFileStorage;
