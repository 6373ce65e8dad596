use foundation::handles::LayerHandle;

/// UI grouping for a layer. Grouping only; draw order is always
/// ascending `render_order`, never category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerCategory {
    Base,
    Overlay,
    Data,
    Setting,
    Debug,
}

impl LayerCategory {
    /// Parses a category name; anything unrecognized is `Overlay`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "base" => LayerCategory::Base,
            "overlay" => LayerCategory::Overlay,
            "data" => LayerCategory::Data,
            "setting" => LayerCategory::Setting,
            "debug" => LayerCategory::Debug,
            _ => LayerCategory::Overlay,
        }
    }
}

/// How a layer entered the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    CapabilityDerived,
}

/// Caller-supplied configuration for one insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOptions {
    pub category: LayerCategory,
    pub enabled: bool,
    pub display_name: Option<String>,
    pub opacity: Option<f64>,
    pub detail_control: Option<f64>,
    pub time_dependent: bool,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            category: LayerCategory::Overlay,
            enabled: true,
            display_name: None,
            opacity: None,
            detail_control: None,
            time_dependent: false,
        }
    }
}

impl LayerOptions {
    pub fn category(category: LayerCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn detail_control(mut self, detail_control: f64) -> Self {
        self.detail_control = Some(detail_control);
        self
    }

    pub fn time_dependent(mut self) -> Self {
        self.time_dependent = true;
        self
    }
}

/// One composed layer.
///
/// Descriptors are created at startup (or when a capability fetch
/// resolves) and live for the whole session; only `enabled` mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub handle: LayerHandle,
    pub display_name: String,
    pub category: LayerCategory,
    pub enabled: bool,
    pub render_order: u32,
    pub opacity: Option<f64>,
    pub detail_control: Option<f64>,
    pub time_dependent: bool,
    pub source_kind: SourceKind,
}
