use foundation::geo::Position;
use foundation::handles::LayerHandle;
use foundation::screen::{CanvasPoint, ClientPoint};
use foundation::time::SimulatedTime;

use crate::pick::PickList;

/// Renderer-provided layer kinds the viewer composes at startup.
///
/// Only the star field and the atmosphere accept a simulated time;
/// setting a time on any other kind is a [`SurfaceError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinLayerKind {
    BlueMarble,
    BlueMarbleLandsat,
    Aerial,
    AerialWithLabels,
    Roads,
    HeatMap,
    Renderable,
    CoordinatesDisplay,
    ViewControls,
    Compass,
    StarField,
    Atmosphere,
    ShowTessellation,
}

impl BuiltinLayerKind {
    pub fn accepts_time(self) -> bool {
        matches!(
            self,
            BuiltinLayerKind::StarField | BuiltinLayerKind::Atmosphere
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    UnknownLayer(LayerHandle),
    NotTimeDependent(LayerHandle),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::UnknownLayer(h) => write!(f, "unknown layer handle {}", h.0),
            SurfaceError::NotTimeDependent(h) => {
                write!(f, "layer {} does not accept a simulated time", h.0)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Primitive contract of the rendering surface.
///
/// Everything here is synchronous and non-blocking; the renderer's
/// own tessellation, compositing, and picking math live behind it.
pub trait GlobeSurface {
    /// Creates one of the renderer's built-in layers.
    fn attach_builtin_layer(&mut self, kind: BuiltinLayerKind) -> LayerHandle;

    /// Creates a tiled imagery layer backed by a remote service.
    fn attach_tiled_layer(&mut self, service_url: &str, layer_name: &str) -> LayerHandle;

    /// Converts page-relative pointer coordinates to canvas-relative.
    fn canvas_coordinates(&self, point: ClientPoint) -> CanvasPoint;

    fn pick(&self, point: CanvasPoint) -> PickList;

    fn go_to(&mut self, position: Position);

    fn redraw(&mut self);

    /// Forwards a projection label; unrecognized labels are ignored
    /// by the renderer without an observable error.
    fn change_projection(&mut self, name: &str);

    fn set_layer_time(
        &mut self,
        layer: LayerHandle,
        time: SimulatedTime,
    ) -> Result<(), SurfaceError>;
}
