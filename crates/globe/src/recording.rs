use foundation::geo::Position;
use foundation::handles::LayerHandle;
use foundation::screen::{CanvasPoint, ClientPoint};
use foundation::time::SimulatedTime;

use crate::pick::PickList;
use crate::surface::{BuiltinLayerKind, GlobeSurface, SurfaceError};

/// Every mutating primitive call a [`RecordingSurface`] has seen.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    GoTo(Position),
    Redraw,
    ChangeProjection(String),
    SetLayerTime(LayerHandle, SimulatedTime),
}

/// In-memory surface double.
///
/// Mints layer handles, applies the canvas origin offset, answers
/// picks from a scripted list, and records every mutating call so
/// frame and gesture logic can be asserted on without a renderer.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    time_aware: Vec<LayerHandle>,
    canvas_origin: ClientPoint,
    next_pick: PickList,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the canvas at `(x, y)` in page coordinates.
    pub fn with_canvas_origin(x: f64, y: f64) -> Self {
        Self {
            canvas_origin: ClientPoint::new(x, y),
            ..Self::default()
        }
    }

    /// Scripts the result of the next pick queries.
    pub fn script_pick(&mut self, list: PickList) {
        self.next_pick = list;
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    fn mint(&mut self, accepts_time: bool) -> LayerHandle {
        let handle = LayerHandle(self.next_handle);
        self.next_handle += 1;
        if accepts_time {
            self.time_aware.push(handle);
        }
        handle
    }
}

impl GlobeSurface for RecordingSurface {
    fn attach_builtin_layer(&mut self, kind: BuiltinLayerKind) -> LayerHandle {
        self.mint(kind.accepts_time())
    }

    fn attach_tiled_layer(&mut self, _service_url: &str, _layer_name: &str) -> LayerHandle {
        self.mint(false)
    }

    fn canvas_coordinates(&self, point: ClientPoint) -> CanvasPoint {
        CanvasPoint::new(point.x - self.canvas_origin.x, point.y - self.canvas_origin.y)
    }

    fn pick(&self, _point: CanvasPoint) -> PickList {
        self.next_pick.clone()
    }

    fn go_to(&mut self, position: Position) {
        self.calls.push(SurfaceCall::GoTo(position));
    }

    fn redraw(&mut self) {
        self.calls.push(SurfaceCall::Redraw);
    }

    fn change_projection(&mut self, name: &str) {
        self.calls.push(SurfaceCall::ChangeProjection(name.to_string()));
    }

    fn set_layer_time(
        &mut self,
        layer: LayerHandle,
        time: SimulatedTime,
    ) -> Result<(), SurfaceError> {
        if layer.0 >= self.next_handle {
            return Err(SurfaceError::UnknownLayer(layer));
        }
        if !self.time_aware.contains(&layer) {
            return Err(SurfaceError::NotTimeDependent(layer));
        }
        self.calls.push(SurfaceCall::SetLayerTime(layer, time));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingSurface, SurfaceCall};
    use crate::surface::{BuiltinLayerKind, GlobeSurface, SurfaceError};
    use foundation::screen::ClientPoint;
    use foundation::time::SimulatedTime;

    #[test]
    fn canvas_coordinates_subtract_origin() {
        let surface = RecordingSurface::with_canvas_origin(10.0, 40.0);
        let canvas = surface.canvas_coordinates(ClientPoint::new(110.0, 90.0));
        assert_eq!((canvas.x, canvas.y), (100.0, 50.0));
    }

    #[test]
    fn only_time_aware_layers_accept_time() {
        let mut surface = RecordingSurface::new();
        let stars = surface.attach_builtin_layer(BuiltinLayerKind::StarField);
        let roads = surface.attach_builtin_layer(BuiltinLayerKind::Roads);

        assert!(surface.set_layer_time(stars, SimulatedTime(1.0)).is_ok());
        assert_eq!(
            surface.set_layer_time(roads, SimulatedTime(1.0)),
            Err(SurfaceError::NotTimeDependent(roads))
        );
        assert_eq!(
            surface.calls(),
            &[SurfaceCall::SetLayerTime(stars, SimulatedTime(1.0))]
        );
    }

    #[test]
    fn mints_distinct_handles() {
        let mut surface = RecordingSurface::new();
        let a = surface.attach_tiled_layer("https://tiles.example/wms", "osm");
        let b = surface.attach_tiled_layer("https://tiles.example/wms", "osm");
        assert_ne!(a, b);
    }
}
