// Widget service - Use case for drawing the current state
use crate::domain::chart::ChartRenderer;
use crate::domain::forecast::ForecastSnapshot;
use crate::domain::scene::Scene;
use chrono::{DateTime, TimeZone};
use std::sync::Arc;
use tokio::sync::watch;

/// What the widget can show. Once `Ready`, it stays `Ready`; later fetches
/// only swap in a newer snapshot.
#[derive(Debug, Clone, Default)]
pub enum WidgetState {
    #[default]
    Loading,
    Ready(Arc<ForecastSnapshot>),
}

impl WidgetState {
    pub fn snapshot(&self) -> Option<&Arc<ForecastSnapshot>> {
        match self {
            WidgetState::Loading => None,
            WidgetState::Ready(snapshot) => Some(snapshot),
        }
    }
}

pub fn state_channel() -> (watch::Sender<WidgetState>, watch::Receiver<WidgetState>) {
    watch::channel(WidgetState::Loading)
}

#[derive(Clone)]
pub struct WidgetService {
    state: watch::Receiver<WidgetState>,
    chart: Arc<ChartRenderer>,
}

impl WidgetService {
    pub fn new(state: watch::Receiver<WidgetState>, chart: ChartRenderer) -> Self {
        Self {
            state,
            chart: Arc::new(chart),
        }
    }

    pub fn current_state(&self) -> WidgetState {
        self.state.borrow().clone()
    }

    pub fn scene_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Scene {
        match self.current_state() {
            WidgetState::Loading => self.chart.loading(),
            WidgetState::Ready(snapshot) => self.chart.render(&snapshot, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartLayout, Palette};
    use crate::domain::scene::{Color, Font};
    use chrono::{Duration, Utc};

    fn chart() -> ChartRenderer {
        let white = Color::new("#FFFFFF");
        ChartRenderer::new(ChartLayout {
            width: 480.0,
            height: 272.0,
            baseline_value: 60.0,
            baseline_y: 180.0,
            scale_y: 5.0,
            font: Font {
                family: "monospace".to_string(),
                size: 12.0,
            },
            palette: Palette {
                warmer: Color::new("#ff8080"),
                cooler: Color::new("#6969ff"),
                yesterday: white.clone(),
                yesterday_opacity: 0.35,
                today_opacity: 0.7,
                annotation: white.clone(),
                hour_label: white.clone(),
                now_marker: white,
            },
        })
    }

    #[test]
    fn test_loading_until_first_snapshot() {
        let (tx, rx) = state_channel();
        let service = WidgetService::new(rx, chart());
        let now = Utc::now();

        let scene = service.scene_at(&now);
        assert_eq!(scene.labels().next().map(|l| l.content.as_str()), Some("loading..."));
        assert!(service.current_state().snapshot().is_none());

        let times = vec![now, now + Duration::hours(1)];
        let snapshot = ForecastSnapshot::new(vec![60.0, 62.0], vec![61.0, 61.0], times, now).unwrap();
        tx.send_replace(WidgetState::Ready(Arc::new(snapshot)));

        let scene = service.scene_at(&now);
        assert_eq!(scene.rects().count(), 4);
        assert!(service.current_state().snapshot().is_some());
    }
}
