#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Network or parse failure while fetching a capability manifest.
    CapabilitiesFetch(String),
    /// The requested layer name is absent from the manifest.
    LayerNotFound(String),
    /// The ticket was already fulfilled or abandoned.
    StaleTicket,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::CapabilitiesFetch(msg) => {
                write!(f, "capability manifest unavailable: {msg}")
            }
            CatalogError::LayerNotFound(name) => {
                write!(f, "layer {name:?} not present in capability manifest")
            }
            CatalogError::StaleTicket => write!(f, "capability ticket already settled"),
        }
    }
}

impl std::error::Error for CatalogError {}
