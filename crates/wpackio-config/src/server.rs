//! Local server configuration.
//!
//! The production build only reads `dist_public_path` from here, but the whole
//! struct travels with the project config so that composed development and
//! production configurations stay derivable from the same inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// URL of the local WordPress install being proxied.
    #[serde(default = "default_proxy")]
    pub proxy: String,

    #[serde(default = "default_ui_port")]
    pub ui_port: u16,

    #[serde(default = "default_open")]
    pub open: bool,

    /// Overrides the computed `/wp-content/...` public path of production assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist_public_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            proxy: default_proxy(),
            ui_port: default_ui_port(),
            open: default_open(),
            dist_public_path: None,
        }
    }
}

impl ServerConfig {
    /// Host used in development URLs.
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or("localhost")
    }

    /// The proxied WordPress URL, which is also where a production build is viewed.
    pub fn local_url(&self) -> &str {
        &self.proxy
    }
}

fn default_port() -> u16 {
    3000
}

fn default_proxy() -> String {
    "http://localhost:8080".into()
}

fn default_ui_port() -> u16 {
    3001
}

fn default_open() -> bool {
    true
}
