pub mod chat_controller;
pub mod health_controller;
pub mod root_controller;

pub use chat_controller::ChatController;
pub use health_controller::HealthController;
pub use root_controller::{EndpointDoc, RootController, ServiceInfo};
