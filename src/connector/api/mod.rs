pub mod container;
pub mod controller;
pub mod error;
pub mod http;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use error::{ApiError, ErrorBody};
pub use http::{build_router, serve};
pub use router::Router;
