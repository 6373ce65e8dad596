use foundation::geo::Position;
use foundation::screen::ClientPoint;
use globe::GlobeSurface;

/// A pointer-down or tap carrying page-relative coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TapEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl TapEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Converts a tap into a pick query and, when the pick resolves to
/// exactly one terrain object, navigates there.
///
/// Every other outcome is a silent no-op. Pick and navigate are
/// synchronous, so re-entrant gestures are safe; this never awaits.
///
/// Returns the navigated position, if any.
pub fn dispatch_tap<S: GlobeSurface>(surface: &mut S, event: TapEvent) -> Option<Position> {
    let canvas = surface.canvas_coordinates(ClientPoint::new(event.client_x, event.client_y));
    let picked = surface.pick(canvas);

    let position = picked.sole_terrain_hit()?;
    surface.go_to(position);
    Some(position)
}
