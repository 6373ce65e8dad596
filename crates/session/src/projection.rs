use globe::{GlobeSurface, ProjectionMode};

/// Exclusive-select projection controls.
///
/// Mirrors a row of UI buttons: selecting one clears the active
/// marker from every sibling and sets it on the selection, then
/// forwards the label to the globe. Unrecognized labels are forwarded
/// too and fail silently at the renderer boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSwitcher {
    controls: Vec<(String, bool)>,
}

impl Default for ProjectionSwitcher {
    fn default() -> Self {
        let mut controls: Vec<(String, bool)> = ProjectionMode::ALL
            .iter()
            .map(|m| (m.label().to_string(), false))
            .collect();
        controls[0].1 = true; // the globe starts in 3D
        Self { controls }
    }
}

impl ProjectionSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `label` as the single active control and forwards it.
    ///
    /// A label outside the known set still becomes the active marker,
    /// matching the original UI where the clicked control is marked
    /// regardless.
    pub fn select<S: GlobeSurface>(&mut self, surface: &mut S, label: &str) {
        for (_, active) in &mut self.controls {
            *active = false;
        }
        match self.controls.iter_mut().find(|(l, _)| l == label) {
            Some((_, active)) => *active = true,
            None => self.controls.push((label.to_string(), true)),
        }
        surface.change_projection(label);
    }

    /// Label of the single active control.
    pub fn active(&self) -> &str {
        self.controls
            .iter()
            .find(|(_, active)| *active)
            .map(|(label, _)| label.as_str())
            .unwrap_or_default()
    }

    pub fn active_mode(&self) -> Option<ProjectionMode> {
        ProjectionMode::from_label(self.active())
    }

    #[cfg(test)]
    fn assert_exclusive(&self) {
        let count = self.controls.iter().filter(|(_, active)| *active).count();
        assert_eq!(count, 1);
    }
}
