use foundation::geo::Position;

/// One object reported by a pick query.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickedObject {
    pub is_terrain: bool,
    pub position: Position,
}

impl PickedObject {
    pub fn terrain(position: Position) -> Self {
        Self {
            is_terrain: true,
            position,
        }
    }

    pub fn feature(position: Position) -> Self {
        Self {
            is_terrain: false,
            position,
        }
    }
}

/// Transient result of one pick query.
///
/// Lives only for the duration of a single gesture dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickList {
    pub objects: Vec<PickedObject>,
}

impl PickList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(objects: Vec<PickedObject>) -> Self {
        Self { objects }
    }

    /// The terrain position, but only when the pick resolved to
    /// exactly one object and that object is terrain.
    ///
    /// Zero hits, multiple hits, and a single non-terrain hit all
    /// return `None`; those outcomes are ambiguous, not errors.
    pub fn sole_terrain_hit(&self) -> Option<Position> {
        match self.objects.as_slice() {
            [only] if only.is_terrain => Some(only.position),
            _ => None,
        }
    }
}
