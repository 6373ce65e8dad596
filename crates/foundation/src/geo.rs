/// Geodetic position in degrees.
///
/// Latitude is positive north, longitude positive east. Values are
/// carried as-is; normalization is the renderer's concern.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
