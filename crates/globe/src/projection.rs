/// Closed set of projections the globe can present.
///
/// Exactly one mode is active at any time. Labels are the strings the
/// UI forwards; unrecognized labels parse to `None` but are still
/// forwarded to the renderer, which ignores them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    ThreeD,
    Equirectangular,
    Mercator,
    NorthPolar,
    SouthPolar,
    NorthUps,
    SouthUps,
    NorthGnomonic,
    SouthGnomonic,
}

impl ProjectionMode {
    pub const ALL: [ProjectionMode; 9] = [
        ProjectionMode::ThreeD,
        ProjectionMode::Equirectangular,
        ProjectionMode::Mercator,
        ProjectionMode::NorthPolar,
        ProjectionMode::SouthPolar,
        ProjectionMode::NorthUps,
        ProjectionMode::SouthUps,
        ProjectionMode::NorthGnomonic,
        ProjectionMode::SouthGnomonic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectionMode::ThreeD => "3D",
            ProjectionMode::Equirectangular => "Equirectangular",
            ProjectionMode::Mercator => "Mercator",
            ProjectionMode::NorthPolar => "North Polar",
            ProjectionMode::SouthPolar => "South Polar",
            ProjectionMode::NorthUps => "North UPS",
            ProjectionMode::SouthUps => "South UPS",
            ProjectionMode::NorthGnomonic => "North Gnomonic",
            ProjectionMode::SouthGnomonic => "South Gnomonic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectionMode;

    #[test]
    fn labels_round_trip() {
        for mode in ProjectionMode::ALL {
            assert_eq!(ProjectionMode::from_label(mode.label()), Some(mode));
        }
    }

    #[test]
    fn unrecognized_label_parses_to_none() {
        assert_eq!(ProjectionMode::from_label("Azimuthal Fisheye"), None);
    }
}
