/// Pointer location relative to the upper-left corner of the page.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer location relative to the upper-left corner of the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
