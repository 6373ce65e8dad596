mod config;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use globe::RecordingSurface;
use layers::{CapabilityRequest, CatalogError, Ticket};
use runtime::{Clock, FrameScheduler, SystemClock, TaskControl};
use session::{Session, StackConfig, TapEvent, build_default_stack};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::ViewerConfig;

type Completion = (Ticket, Result<String, CatalogError>);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ViewerConfig::from_env();
    let clock = SystemClock;

    // The renderer is an external collaborator; the recording surface
    // stands in for it and lets this binary exercise the full core.
    let session = Rc::new(RefCell::new(Session::new(
        RecordingSurface::new(),
        config.simulated_millis_per_day,
        clock.now(),
    )));

    let stack = StackConfig {
        aerial_api_key: config.aerial_api_key.clone(),
        capability_service: config.capability_service.clone(),
    };
    build_default_stack(&mut session.borrow_mut(), &stack);

    // Capability fetches run on the async executor; completions come
    // back over a channel and are applied on this thread only.
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let http = reqwest::Client::new();
    for (ticket, request) in session.borrow_mut().take_pending_fetches() {
        let tx = tx.clone();
        let http = http.clone();
        tokio::spawn(async move {
            let result = fetch_manifest(&http, &request).await;
            let _ = tx.send((ticket, result));
        });
    }
    drop(tx);

    let mut scheduler = FrameScheduler::new();
    let sim = session.clone();
    let sim_task = scheduler.register(move |tick| {
        sim.borrow_mut().run_frame(tick.now);
        TaskControl::Continue
    });

    session.borrow_mut().select_projection("3D");

    for frame in 0..config.frames {
        while let Ok((ticket, result)) = rx.try_recv() {
            if let Some(key) = session.borrow_mut().complete_capability(ticket, result) {
                debug!(?key, "capability layer resolved");
            }
        }

        scheduler.run_frame(clock.now());

        // A tap in the middle of the canvas; the recording surface
        // answers with an empty pick, so this is a no-op navigation.
        if frame == 0 {
            let _ = session.borrow_mut().handle_tap(TapEvent::new(400.0, 300.0));
        }

        tokio::time::sleep(Duration::from_millis(config.frame_interval_ms)).await;
    }

    scheduler.cancel(sim_task);
    let mut session = session.borrow_mut();
    session.stop();

    let simulated = session.simulated_time().map(|t| t.0);
    info!(
        layers = session.catalog().len(),
        pending = session.catalog().pending_count(),
        projection = session.active_projection(),
        simulated,
        "viewer session finished"
    );
    info!(
        surface_calls = session.surface_mut().take_calls().len(),
        "surface call trace drained"
    );
}

async fn fetch_manifest(
    http: &reqwest::Client,
    request: &CapabilityRequest,
) -> Result<String, CatalogError> {
    let response = http
        .get(&request.service_url)
        .send()
        .await
        .map_err(|e| CatalogError::CapabilitiesFetch(e.to_string()))?;
    let response = response
        .error_for_status()
        .map_err(|e| CatalogError::CapabilitiesFetch(e.to_string()))?;
    response
        .text()
        .await
        .map_err(|e| CatalogError::CapabilitiesFetch(e.to_string()))
}
