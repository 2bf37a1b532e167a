use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "Llama 3 Function Agent API";
pub const DOCS_PATH: &str = "/docs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub docs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDoc {
    pub method: String,
    pub path: String,
    pub summary: String,
}

const ENDPOINTS: [(&str, &str, &str); 4] = [
    ("GET", "/", "Service metadata"),
    ("GET", DOCS_PATH, "This endpoint listing"),
    ("GET", "/health", "Backend connectivity and model availability"),
    (
        "POST",
        "/chat",
        "Send {message, temperature?, max_tokens?} and receive the model reply with any JSON payload it contains",
    ),
];

pub struct RootController;

impl RootController {
    pub fn info() -> ServiceInfo {
        ServiceInfo {
            name: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            docs: DOCS_PATH.to_string(),
        }
    }

    pub fn docs() -> Vec<EndpointDoc> {
        ENDPOINTS
            .iter()
            .map(|(method, path, summary)| EndpointDoc {
                method: method.to_string(),
                path: path.to_string(),
                summary: summary.to_string(),
            })
            .collect()
    }
}
