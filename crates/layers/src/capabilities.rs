use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Request for one capability-derived layer, captured at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRequest {
    pub service_url: String,
    pub layer_name: String,
}

impl CapabilityRequest {
    pub fn new(service_url: impl Into<String>, layer_name: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            layer_name: layer_name.into(),
        }
    }
}

/// One layer advertised by a capability service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityLayer {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time_dependent: bool,
    #[serde(default)]
    pub opacity: Option<f64>,
}

impl CapabilityLayer {
    /// Human-readable name: the title when the service provides one.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Manifest returned by `GET <service_url>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityManifest {
    pub service: String,
    pub layers: Vec<CapabilityLayer>,
}

impl CapabilityManifest {
    /// Parses the manifest body; malformed JSON is a fetch failure.
    pub fn parse(body: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(body).map_err(|e| CatalogError::CapabilitiesFetch(e.to_string()))
    }

    pub fn find(&self, layer_name: &str) -> Result<&CapabilityLayer, CatalogError> {
        self.layers
            .iter()
            .find(|l| l.name == layer_name)
            .ok_or_else(|| CatalogError::LayerNotFound(layer_name.to_string()))
    }
}
