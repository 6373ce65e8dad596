use globe::{BuiltinLayerKind, GlobeSurface};
use layers::{CapabilityRequest, LayerCategory, LayerOptions};
use tracing::error;

use crate::session::Session;

/// Startup inputs for the default layer stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackConfig {
    /// Credential for the aerial imagery service. Optional: without
    /// it the credentialed layers are composed disabled and the rest
    /// of the stack is unaffected.
    pub aerial_api_key: Option<String>,
    /// Capability service the osm/overlay layers come from.
    pub capability_service: String,
}

/// Composes the session's startup layer stack, first to last in draw
/// order, mirroring a full viewer: base imagery, overlays, data,
/// settings, debug.
pub fn build_default_stack<S: GlobeSurface>(session: &mut Session<S>, config: &StackConfig) {
    let credentialed = config.aerial_api_key.is_some();
    if !credentialed {
        error!("aerial imagery API key missing; aerial layers disabled");
    }

    session.add_builtin_layer(
        BuiltinLayerKind::BlueMarble,
        LayerOptions::category(LayerCategory::Base),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::BlueMarbleLandsat,
        LayerOptions::category(LayerCategory::Base).disabled(),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::Aerial,
        LayerOptions::category(LayerCategory::Base).disabled(),
    );

    let labels = LayerOptions::category(LayerCategory::Base).detail_control(1.5);
    session.add_builtin_layer(
        BuiltinLayerKind::AerialWithLabels,
        if credentialed { labels } else { labels.disabled() },
    );

    session.add_layer_from_capabilities(
        CapabilityRequest::new(&config.capability_service, "osm"),
        LayerOptions::category(LayerCategory::Base).disabled(),
    );

    session.add_builtin_layer(
        BuiltinLayerKind::Roads,
        LayerOptions::category(LayerCategory::Overlay)
            .disabled()
            .detail_control(1.5)
            .opacity(0.8),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::HeatMap,
        LayerOptions::default().named("HeatMap").disabled(),
    );
    session.add_layer_from_capabilities(
        CapabilityRequest::new(&config.capability_service, "overlay"),
        LayerOptions::category(LayerCategory::Overlay)
            .named("OpenStreetMap overlay by EOX")
            .disabled()
            .opacity(0.8),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::Renderable,
        LayerOptions::category(LayerCategory::Data).named("Markers"),
    );

    session.add_builtin_layer(
        BuiltinLayerKind::CoordinatesDisplay,
        LayerOptions::category(LayerCategory::Setting),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::ViewControls,
        LayerOptions::category(LayerCategory::Setting),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::Compass,
        LayerOptions::category(LayerCategory::Setting).disabled(),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::StarField,
        LayerOptions::category(LayerCategory::Setting).named("Stars"),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::Atmosphere,
        LayerOptions::category(LayerCategory::Setting),
    );
    session.add_builtin_layer(
        BuiltinLayerKind::ShowTessellation,
        LayerOptions::category(LayerCategory::Debug).disabled(),
    );
}

#[cfg(test)]
mod tests {
    use super::{StackConfig, build_default_stack};
    use crate::session::Session;
    use foundation::time::EpochMillis;
    use globe::RecordingSurface;
    use layers::LayerCategory;

    fn config(with_key: bool) -> StackConfig {
        StackConfig {
            aerial_api_key: with_key.then(|| "key".to_string()),
            capability_service: "https://tiles.example/wms".to_string(),
        }
    }

    #[test]
    fn stack_is_ordered_and_grouped() {
        let mut s = Session::new(RecordingSurface::new(), 8_000.0, EpochMillis(0));
        build_default_stack(&mut s, &config(true));

        // 13 static layers resolved immediately, 2 capability fetches
        // still pending.
        assert_eq!(s.catalog().len(), 13);
        assert_eq!(s.catalog().pending_count(), 2);
        assert_eq!(s.take_pending_fetches().len(), 2);

        let settings = s.catalog().in_category(LayerCategory::Setting);
        let names: Vec<&str> = settings.iter().map(|d| d.display_name.as_str()).collect();
        assert!(names.contains(&"Stars"));

        // Draw order is strictly increasing even with reservations in
        // between.
        let orders: Vec<u32> = s.catalog().draw_order().iter().map(|d| d.render_order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn two_layers_join_the_time_push() {
        let mut s = Session::new(RecordingSurface::new(), 8_000.0, EpochMillis(0));
        build_default_stack(&mut s, &config(true));

        let time_dependent = s
            .catalog()
            .draw_order()
            .iter()
            .filter(|d| d.time_dependent)
            .count();
        assert_eq!(time_dependent, 2);
    }

    #[test]
    fn missing_credential_degrades_aerial_layers_only() {
        let mut s = Session::new(RecordingSurface::new(), 8_000.0, EpochMillis(0));
        build_default_stack(&mut s, &config(false));

        let enabled_bases: Vec<u32> = s
            .catalog()
            .in_category(LayerCategory::Base)
            .iter()
            .filter(|d| d.enabled)
            .map(|d| d.render_order)
            .collect();
        // Only the default imagery layer stays enabled.
        assert_eq!(enabled_bases, vec![0]);

        // Everything else is unaffected.
        assert_eq!(s.catalog().len(), 13);
        assert_eq!(s.catalog().pending_count(), 2);
    }
}
