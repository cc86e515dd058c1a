// Chart geometry - turns a forecast snapshot into a scene
use crate::domain::forecast::ForecastSnapshot;
use crate::domain::scene::{Color, Font, Label, Line, Rect, Scene};
use chrono::{DateTime, TimeZone, Timelike, Utc};

const VALUE_LABEL_DROP: f64 = 50.0;
const HOUR_LABEL_DROP: f64 = 70.0;
const HOUR_TICK_EVERY: usize = 3;
const ANNOTATION_X: f64 = 15.0;
const ANNOTATION_Y: f64 = 45.0;
const CONNECTOR_X: f64 = 40.0;
const CONNECTOR_Y: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub warmer: Color,
    pub cooler: Color,
    pub yesterday: Color,
    pub yesterday_opacity: f64,
    pub today_opacity: f64,
    pub annotation: Color,
    pub hour_label: Color,
    pub now_marker: Color,
}

/// Canvas size and the mapping from temperature to pixel rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub baseline_value: f64,
    pub baseline_y: f64,
    pub scale_y: f64,
    pub font: Font,
    pub palette: Palette,
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    layout: ChartLayout,
}

impl ChartRenderer {
    pub fn new(layout: ChartLayout) -> Self {
        Self { layout }
    }

    /// Signed pixel deviation of a sample from the baseline row.
    pub fn offset(&self, sample: f64) -> f64 {
        (sample - self.layout.baseline_value) * self.layout.scale_y
    }

    /// Top edge and height of the bar for a sample. Positive offsets grow up
    /// from the baseline, everything else hangs down from it.
    pub fn bar_span(&self, sample: f64) -> (f64, f64) {
        let offset = self.offset(sample);
        let top = if offset > 0.0 {
            self.layout.baseline_y - offset
        } else {
            self.layout.baseline_y
        };
        (top, offset.abs())
    }

    /// Horizontal position of `now` across the span of `times`. A span with
    /// no duration puts the marker at the left edge.
    pub fn now_position<Tz: TimeZone>(&self, times: &[DateTime<Utc>], now: &DateTime<Tz>) -> f64 {
        let (Some(first), Some(last)) = (times.first(), times.last()) else {
            return 0.0;
        };
        let span = (last.timestamp_millis() - first.timestamp_millis()) as f64;
        if span <= 0.0 {
            return 0.0;
        }
        let elapsed = (now.timestamp_millis() - first.timestamp_millis()) as f64;
        self.layout.width * elapsed / span
    }

    pub fn loading(&self) -> Scene {
        let mut scene = Scene::new(self.layout.width, self.layout.height);
        scene.push(self.label(
            0.0,
            self.layout.font.size,
            self.layout.palette.annotation.clone(),
            "loading...".to_string(),
        ));
        scene
    }

    /// Draws the full comparison chart. Hour ticks are read in `now`'s timezone.
    pub fn render<Tz: TimeZone>(&self, snapshot: &ForecastSnapshot, now: &DateTime<Tz>) -> Scene {
        if snapshot.is_empty() {
            return self.loading();
        }

        let layout = &self.layout;
        let palette = &layout.palette;
        let column = layout.width / snapshot.len() as f64;
        let timezone = now.timezone();
        let extremes = snapshot.extremes();
        let mut scene = Scene::new(layout.width, layout.height);

        let now_x = self.now_position(snapshot.times(), now);
        scene.push(Line {
            x1: now_x,
            y1: 0.0,
            x2: now_x,
            y2: layout.height,
            stroke: palette.now_marker.clone(),
        });

        for (i, &sample) in snapshot.yesterday().iter().enumerate() {
            let (top, height) = self.bar_span(sample);
            scene.push(Rect {
                x: i as f64 * column,
                y: top,
                width: column,
                height,
                fill: palette.yesterday.clone(),
                opacity: palette.yesterday_opacity,
            });
        }

        for (i, &sample) in snapshot.today().iter().enumerate() {
            let x = i as f64 * column;
            let (top, height) = self.bar_span(sample);
            let warmer = snapshot.is_warmer(i);
            let color = if warmer {
                palette.warmer.clone()
            } else {
                palette.cooler.clone()
            };

            scene.push(self.label(
                x + column / 4.0,
                layout.baseline_y + VALUE_LABEL_DROP,
                color.clone(),
                rounded(sample).to_string(),
            ));

            if i % HOUR_TICK_EVERY == 0 {
                let hour = snapshot.times()[i].with_timezone(&timezone).hour();
                scene.push(self.label(
                    x + column / 4.0,
                    layout.baseline_y + HOUR_LABEL_DROP,
                    palette.hour_label.clone(),
                    hour.to_string(),
                ));
            }

            let delta = extremum_delta(warmer, sample, snapshot.yesterday()[i]);
            if extremes.is_some_and(|e| e.max_index == i) {
                self.annotate(&mut scene, x, column, top, format!("high: {}", delta));
            }
            if extremes.is_some_and(|e| e.min_index == i) {
                self.annotate(&mut scene, x, column, top, format!("low: {}", delta));
            }

            scene.push(Rect {
                x,
                y: top,
                width: column,
                height,
                fill: color,
                opacity: palette.today_opacity,
            });
        }

        scene.push(Line {
            x1: 0.0,
            y1: layout.baseline_y,
            x2: layout.width,
            y2: layout.baseline_y,
            stroke: palette.annotation.clone(),
        });

        scene
    }

    fn annotate(&self, scene: &mut Scene, x: f64, column: f64, bar_top: f64, text: String) {
        let color = self.layout.palette.annotation.clone();
        scene.push(self.label(x + ANNOTATION_X, ANNOTATION_Y, color.clone(), text));
        scene.push(Line {
            x1: x + CONNECTOR_X,
            y1: CONNECTOR_Y,
            x2: x + column / 2.0,
            y2: bar_top,
            stroke: color,
        });
    }

    fn label(&self, x: f64, y: f64, fill: Color, content: String) -> Label {
        Label {
            x,
            y,
            font: self.layout.font.clone(),
            fill,
            content,
        }
    }
}

/// Rounds half away from zero.
pub fn rounded(value: f64) -> i64 {
    value.round() as i64
}

// The sign follows the warmer flag at that hour, for the low label as well.
fn extremum_delta(warmer: bool, today: f64, yesterday: f64) -> String {
    format!(
        "{} ({}{})",
        rounded(today),
        if warmer { "+" } else { "-" },
        rounded((today - yesterday).abs())
    )
}
