//! Permission-gated, single-shot location acquisition.
//!
//! Each request cycle asks for authorization, acquires one fix, reverse
//! geocodes it and publishes exactly one terminal [`LocationResult`] through a
//! `watch` channel. Observers subscribe to that channel instead of being
//! called back.
//!
//! A new request while a cycle is still running cancels the running cycle.
//! A cancelled cycle never publishes.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::location::{LocationError, LocationResult, location_text};
use crate::platform::{Authorization, Geocoder, LocationSource};

/// Shared handle to the location state; clones observe the same cycles.
#[derive(Clone)]
pub struct LocationProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    source: Arc<dyn LocationSource>,
    geocoder: Arc<dyn Geocoder>,
    state: watch::Sender<LocationResult>,
    cycle: Mutex<Cycle>,
}

#[derive(Default)]
struct Cycle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl LocationProvider {
    pub fn new(source: Arc<dyn LocationSource>, geocoder: Arc<dyn Geocoder>) -> Self {
        let (state, _) = watch::channel(LocationResult::Unset);
        Self {
            inner: Arc::new(ProviderInner {
                source,
                geocoder,
                state,
                cycle: Mutex::new(Cycle::default()),
            }),
        }
    }

    /// Start a new request cycle.
    ///
    /// Publishes `Unavailable` right away when location services are disabled,
    /// otherwise publishes `Pending` and spawns the acquisition on the current
    /// Tokio runtime. Must be called from within a runtime.
    ///
    /// The services check runs before authorization: a disabled platform
    /// never shows the permission prompt, since no fix could follow it.
    pub fn request_permission_and_start(&self) {
        let mut cycle = self
            .inner
            .cycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        cycle.generation += 1;
        if let Some(task) = cycle.task.take()
            && !task.is_finished()
        {
            tracing::info!("Cancelling in-flight location request");
            task.abort();
        }

        if !self.inner.source.services_enabled() {
            tracing::warn!("Location services are disabled");
            self.inner
                .state
                .send_replace(LocationError::ServiceDisabled.into());
            return;
        }

        tracing::info!(cycle = cycle.generation, "Requesting location");
        self.inner.state.send_replace(LocationResult::Pending);

        let generation = cycle.generation;
        let inner = self.inner.clone();
        cycle.task = Some(tokio::spawn(async move {
            let result = inner.acquire().await;
            inner.publish(generation, result);
        }));
    }

    /// Latest published result
    pub fn current(&self) -> LocationResult {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified on every published transition
    pub fn subscribe(&self) -> watch::Receiver<LocationResult> {
        self.inner.state.subscribe()
    }

    /// Wait until the current cycle reaches a terminal state.
    ///
    /// Returns immediately with `Unset` when no request has been made.
    pub async fn wait_for_terminal(&self) -> LocationResult {
        let mut rx = self.subscribe();
        match rx
            .wait_for(|r| r.is_terminal() || *r == LocationResult::Unset)
            .await
        {
            Ok(result) => result.clone(),
            Err(_) => self.current(),
        }
    }
}

impl ProviderInner {
    async fn acquire(&self) -> LocationResult {
        if self.source.request_authorization().await == Authorization::Denied {
            return LocationError::PermissionDenied.into();
        }

        let coordinate = match self.source.start_single_location_update().await {
            Ok(coordinate) => coordinate,
            Err(e) => return LocationError::AcquisitionFailed(format!("{:#}", e)).into(),
        };
        tracing::debug!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            "Location fix acquired"
        );

        match self.geocoder.reverse_geocode(coordinate).await {
            Ok(address) => {
                self.source.stop_updates();
                LocationResult::Available(location_text(coordinate, &address))
            }
            Err(e) => LocationError::GeocodeFailed(format!("{:#}", e)).into(),
        }
    }

    /// Publish a terminal result unless a newer cycle has started
    fn publish(&self, generation: u64, result: LocationResult) {
        let cycle = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);
        if cycle.generation != generation {
            tracing::debug!(generation, "Dropping result of superseded location request");
            return;
        }
        match &result {
            LocationResult::Unavailable(reason) => tracing::warn!("{}", reason),
            _ => tracing::info!("Location available"),
        }
        self.state.send_replace(result);
    }
}
