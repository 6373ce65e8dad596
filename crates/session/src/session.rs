use foundation::geo::Position;
use foundation::handles::LayerHandle;
use foundation::time::{EpochMillis, SimulatedTime};
use globe::{BuiltinLayerKind, GlobeSurface};
use layers::{CapabilityManifest, CapabilityRequest, CatalogError, LayerCatalog, LayerKey, LayerOptions, Ticket};
use tracing::warn;

use crate::gestures::{TapEvent, dispatch_tap};
use crate::projection::ProjectionSwitcher;
use crate::simulation::SimulationClock;

/// Per-session context owning the globe surface and everything that
/// drives it: the layer catalog, the day/night simulation clock, the
/// projection controls, and the queue of in-flight capability
/// fetches.
///
/// Constructed once per session and mutated only from the session
/// thread; the capability fetch is the single deferred completion and
/// it resumes here through [`Session::complete_capability`].
pub struct Session<S: GlobeSurface> {
    surface: S,
    catalog: LayerCatalog,
    clock: SimulationClock,
    projections: ProjectionSwitcher,
    /// Handles the per-frame time push walks; kept separately so a
    /// frame is O(time-dependent layers), not O(all layers).
    time_dependent: Vec<LayerHandle>,
    pending_fetches: Vec<(Ticket, CapabilityRequest)>,
    last_simulated: Option<SimulatedTime>,
}

impl<S: GlobeSurface> Session<S> {
    pub fn new(surface: S, simulated_millis_per_day: f64, now: EpochMillis) -> Self {
        let mut clock = SimulationClock::new(simulated_millis_per_day);
        clock.start(now);
        Self {
            surface,
            catalog: LayerCatalog::new(),
            clock,
            projections: ProjectionSwitcher::new(),
            time_dependent: Vec::new(),
            pending_fetches: Vec::new(),
            last_simulated: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    /// Appends an already-constructed layer.
    pub fn add_layer(&mut self, handle: LayerHandle, options: LayerOptions) -> LayerKey {
        if options.time_dependent {
            self.time_dependent.push(handle);
        }
        self.catalog.add_layer(handle, options)
    }

    /// Attaches one of the renderer's built-in layers and appends it.
    ///
    /// Kinds that accept a simulated time join the per-frame push
    /// regardless of the caller's options.
    pub fn add_builtin_layer(
        &mut self,
        kind: BuiltinLayerKind,
        mut options: LayerOptions,
    ) -> LayerKey {
        let handle = self.surface.attach_builtin_layer(kind);
        options.time_dependent |= kind.accepts_time();
        self.add_layer(handle, options)
    }

    /// Reserves the layer's position now; the descriptor is completed
    /// when the capability fetch lands in [`Session::complete_capability`].
    pub fn add_layer_from_capabilities(
        &mut self,
        request: CapabilityRequest,
        options: LayerOptions,
    ) -> Ticket {
        let ticket = self
            .catalog
            .reserve_capability_layer(request.clone(), options);
        self.pending_fetches.push((ticket, request));
        ticket
    }

    /// Drains the fetches issued since the last call, in submission
    /// order, for the host to resolve.
    pub fn take_pending_fetches(&mut self) -> Vec<(Ticket, CapabilityRequest)> {
        std::mem::take(&mut self.pending_fetches)
    }

    /// Applies a finished capability fetch.
    ///
    /// On any failure the reservation is abandoned: the offending
    /// layer is omitted and every other entry keeps its order.
    pub fn complete_capability(
        &mut self,
        ticket: Ticket,
        body: Result<String, CatalogError>,
    ) -> Option<LayerKey> {
        let Some(request) = self.catalog.request(ticket).cloned() else {
            warn!(error = %CatalogError::StaleTicket, "dropping capability completion");
            return None;
        };

        let resolved = body
            .and_then(|body| CapabilityManifest::parse(&body))
            .and_then(|manifest| manifest.find(&request.layer_name).cloned());
        let layer = match resolved {
            Ok(layer) => layer,
            Err(err) => {
                self.catalog.abandon(ticket, &err);
                return None;
            }
        };

        let handle = self
            .surface
            .attach_tiled_layer(&request.service_url, &request.layer_name);
        match self.catalog.fulfill(ticket, handle, &layer) {
            Ok(key) => {
                if self.catalog.get(key).is_some_and(|d| d.time_dependent) {
                    self.time_dependent.push(handle);
                }
                Some(key)
            }
            Err(err) => {
                warn!(%err, "dropping capability completion");
                None
            }
        }
    }

    pub fn set_layer_enabled(&mut self, key: LayerKey, enabled: bool) -> Option<bool> {
        self.catalog.set_enabled(key, enabled)
    }

    pub fn toggle_layer(&mut self, key: LayerKey) -> Option<bool> {
        self.catalog.toggle_enabled(key)
    }

    /// Runs one display frame: samples the simulation clock, pushes
    /// the simulated time into every time-dependent layer, and
    /// requests a redraw.
    ///
    /// A failing layer is logged and skipped; the frame always
    /// completes.
    pub fn run_frame(&mut self, now: EpochMillis) {
        let Some(simulated) = self.clock.sample(now) else {
            return;
        };
        for handle in &self.time_dependent {
            if let Err(err) = self.surface.set_layer_time(*handle, simulated) {
                warn!(%err, "skipping time-dependent layer this frame");
            }
        }
        self.surface.redraw();
        self.last_simulated = Some(simulated);
    }

    /// The most recently pushed simulated time (read-only consumer
    /// contract).
    pub fn simulated_time(&self) -> Option<SimulatedTime> {
        self.last_simulated
    }

    pub fn handle_tap(&mut self, event: TapEvent) -> Option<Position> {
        dispatch_tap(&mut self.surface, event)
    }

    pub fn select_projection(&mut self, label: &str) {
        self.projections.select(&mut self.surface, label);
    }

    pub fn active_projection(&self) -> &str {
        self.projections.active()
    }

    /// Stops the simulation clock for teardown.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Session;
    use foundation::time::EpochMillis;
    use globe::{BuiltinLayerKind, RecordingSurface, SurfaceCall};
    use layers::{CapabilityRequest, CatalogError, LayerCategory, LayerOptions};

    fn session() -> Session<RecordingSurface> {
        Session::new(RecordingSurface::new(), 8_000.0, EpochMillis(0))
    }

    const MANIFEST: &str = r#"{
        "service": "https://tiles.example/wms",
        "layers": [{ "name": "osm", "title": "OpenStreetMap" }]
    }"#;

    #[test]
    fn late_capability_resolution_keeps_issue_order() {
        let mut s = session();

        s.add_builtin_layer(
            BuiltinLayerKind::BlueMarble,
            LayerOptions::category(LayerCategory::Base).named("A"),
        );
        let ticket = s.add_layer_from_capabilities(
            CapabilityRequest::new("https://tiles.example/wms", "osm"),
            LayerOptions::category(LayerCategory::Base).named("B"),
        );
        s.add_builtin_layer(
            BuiltinLayerKind::Roads,
            LayerOptions::category(LayerCategory::Overlay).named("C"),
        );

        // Resolution lands well after C was inserted.
        s.complete_capability(ticket, Ok(MANIFEST.to_string()));

        let names: Vec<&str> = s
            .catalog()
            .draw_order()
            .iter()
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn failed_fetch_omits_only_the_offending_layer() {
        let mut s = session();

        s.add_builtin_layer(BuiltinLayerKind::BlueMarble, LayerOptions::default().named("A"));
        let ticket = s.add_layer_from_capabilities(
            CapabilityRequest::new("https://tiles.example/wms", "osm"),
            LayerOptions::default().named("B"),
        );
        s.add_builtin_layer(BuiltinLayerKind::Roads, LayerOptions::default().named("C"));

        s.complete_capability(
            ticket,
            Err(CatalogError::CapabilitiesFetch("timed out".to_string())),
        );

        let names: Vec<&str> = s
            .catalog()
            .draw_order()
            .iter()
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn name_absent_from_manifest_is_omitted() {
        let mut s = session();
        let ticket = s.add_layer_from_capabilities(
            CapabilityRequest::new("https://tiles.example/wms", "hillshade"),
            LayerOptions::default(),
        );

        assert_eq!(s.complete_capability(ticket, Ok(MANIFEST.to_string())), None);
        assert!(s.catalog().is_empty());
    }

    #[test]
    fn frame_pushes_time_into_each_time_dependent_layer_then_redraws() {
        let mut s = session();
        s.add_builtin_layer(
            BuiltinLayerKind::StarField,
            LayerOptions::category(LayerCategory::Setting).named("Stars"),
        );
        s.add_builtin_layer(
            BuiltinLayerKind::Atmosphere,
            LayerOptions::category(LayerCategory::Setting),
        );
        s.add_builtin_layer(BuiltinLayerKind::Compass, LayerOptions::default());

        s.run_frame(EpochMillis(4_000));

        let calls = s.surface_mut().take_calls();
        let time_pushes = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetLayerTime(..)))
            .count();
        assert_eq!(time_pushes, 2);
        assert_eq!(calls.last(), Some(&SurfaceCall::Redraw));

        // Half of an 8000 ms cycle is half a simulated day.
        let simulated = s.simulated_time().unwrap();
        assert!((simulated.0 - 43_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn one_failing_layer_does_not_stall_the_frame() {
        let mut s = session();
        // Marked time-dependent by the caller, but the renderer's
        // compass layer refuses a time: the push must be skipped and
        // the frame must still update the star field and redraw.
        s.add_builtin_layer(
            BuiltinLayerKind::Compass,
            LayerOptions::default().time_dependent(),
        );
        s.add_builtin_layer(BuiltinLayerKind::StarField, LayerOptions::default());

        s.run_frame(EpochMillis(16));

        let calls = s.surface_mut().take_calls();
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, SurfaceCall::SetLayerTime(..)))
                .count(),
            1
        );
        assert_eq!(calls.last(), Some(&SurfaceCall::Redraw));
    }

    #[test]
    fn frames_after_stop_are_inert() {
        let mut s = session();
        s.add_builtin_layer(BuiltinLayerKind::StarField, LayerOptions::default());

        s.stop();
        s.run_frame(EpochMillis(1_000));

        assert!(s.surface_mut().take_calls().is_empty());
        assert_eq!(s.simulated_time(), None);
    }

    #[test]
    fn simulated_time_is_monotonic_across_frames() {
        let mut s = session();
        s.add_builtin_layer(BuiltinLayerKind::Atmosphere, LayerOptions::default());

        let mut previous = f64::MIN;
        for now in (0..1_000).step_by(16) {
            s.run_frame(EpochMillis(now));
            let simulated = s.simulated_time().unwrap().0;
            assert!(simulated >= previous);
            previous = simulated;
        }
    }

    #[test]
    fn scheduler_and_manual_clock_drive_deterministic_frames() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use runtime::{Clock, FrameScheduler, ManualClock, TaskControl};

        let clock = ManualClock::new(0);
        let shared = Rc::new(RefCell::new(session()));
        shared
            .borrow_mut()
            .add_builtin_layer(BuiltinLayerKind::Atmosphere, LayerOptions::default());

        let mut scheduler = FrameScheduler::new();
        let driven = shared.clone();
        let task = scheduler.register(move |tick| {
            driven.borrow_mut().run_frame(tick.now);
            TaskControl::Continue
        });

        // Four frames, 2000 ms apart: one full 8000 ms day cycle.
        for _ in 0..4 {
            clock.advance(2_000);
            scheduler.run_frame(clock.now());
        }
        let after_day = shared.borrow().simulated_time().unwrap();
        assert!((after_day.0 - 86_400_000.0).abs() < 1e-6);

        // The stop request is honored: no further frames run.
        scheduler.cancel(task);
        clock.advance(2_000);
        scheduler.run_frame(clock.now());
        assert_eq!(shared.borrow().simulated_time(), Some(after_day));
    }

    #[test]
    fn pending_fetches_drain_in_submission_order() {
        let mut s = session();
        let t1 = s.add_layer_from_capabilities(
            CapabilityRequest::new("https://a.example", "one"),
            LayerOptions::default(),
        );
        let t2 = s.add_layer_from_capabilities(
            CapabilityRequest::new("https://b.example", "two"),
            LayerOptions::default(),
        );

        let drained = s.take_pending_fetches();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].0, t1);
        assert_eq!(drained[1].0, t2);
        assert!(s.take_pending_fetches().is_empty());
    }
}
