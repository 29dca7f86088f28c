#![warn(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod swagger;

pub use error::ApiError;
pub use server::ApiServer;
pub use state::AppState;
pub use swagger::ApiDoc;
