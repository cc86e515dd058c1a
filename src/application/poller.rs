// Poller - Periodic refresh of the forecast snapshot
use crate::application::forecast_service::ForecastService;
use crate::application::widget_service::WidgetState;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the polling task. Dropping the handle cancels it, along with any
/// fetch still in flight.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetches immediately, then once per `period` whether or not the previous
/// attempt succeeded. Failed attempts leave the published state alone.
pub fn spawn_poller(
    service: ForecastService,
    period: Duration,
    state: watch::Sender<WidgetState>,
) -> PollerHandle {
    spawn_poller_with_clock(service, period, state, || Local::now().date_naive())
}

fn spawn_poller_with_clock(
    service: ForecastService,
    period: Duration,
    state: watch::Sender<WidgetState>,
    today: fn() -> NaiveDate,
) -> PollerHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            refresh(&service, &state, today()).await;
        }
    });

    PollerHandle { task }
}

async fn refresh(service: &ForecastService, state: &watch::Sender<WidgetState>, today: NaiveDate) {
    match service.fetch_snapshot(today).await {
        Ok(snapshot) => {
            tracing::info!(
                hours = snapshot.len(),
                "Fetched forecast snapshot for {}",
                today
            );
            state.send_replace(WidgetState::Ready(Arc::new(snapshot)));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Forecast refresh failed, keeping previous data");
        }
    }
}
