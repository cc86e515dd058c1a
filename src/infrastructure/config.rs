use crate::domain::chart::{ChartLayout, Palette};
use crate::domain::forecast::DisplayWindow;
use crate::domain::scene::{Color, Font};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WidgetConfig {
    pub server: ServerSettings,
    pub location: LocationSettings,
    pub provider: ProviderSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            latitude: 37.7818837,
            longitude: -122.4311703,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub poll_interval_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com".to_string(),
            poll_interval_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub window_start_hour: usize,
    pub window_end_hour: usize,
    pub baseline_value: f64,
    pub baseline_y: f64,
    pub scale_y: f64,
    pub width: f64,
    pub height: f64,
    pub font_family: String,
    pub font_size: f64,
    pub palette: PaletteSettings,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            window_start_hour: 7,
            window_end_hour: 23,
            baseline_value: 60.0,
            baseline_y: 180.0,
            scale_y: 5.0,
            width: 480.0,
            height: 272.0,
            font_family: "monospace".to_string(),
            font_size: 12.0,
            palette: PaletteSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaletteSettings {
    pub warmer: String,
    pub cooler: String,
    pub yesterday: String,
    pub yesterday_opacity: f64,
    pub today_opacity: f64,
    pub annotation: String,
    pub hour_label: String,
    pub now_marker: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            warmer: "#ff8080".to_string(),
            cooler: "#6969ff".to_string(),
            yesterday: "#FFFFFF".to_string(),
            yesterday_opacity: 0.35,
            today_opacity: 0.7,
            annotation: "#FFFFFF".to_string(),
            hour_label: "#e4e4e4".to_string(),
            now_marker: "rgba(255,255,255,0.5)".to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl ChartSettings {
    pub fn window(&self) -> anyhow::Result<DisplayWindow> {
        Ok(DisplayWindow::new(self.window_start_hour, self.window_end_hour)?)
    }

    pub fn layout(&self) -> ChartLayout {
        let palette = &self.palette;
        ChartLayout {
            width: self.width,
            height: self.height,
            baseline_value: self.baseline_value,
            baseline_y: self.baseline_y,
            scale_y: self.scale_y,
            font: Font {
                family: self.font_family.clone(),
                size: self.font_size,
            },
            palette: Palette {
                warmer: Color::new(&palette.warmer),
                cooler: Color::new(&palette.cooler),
                yesterday: Color::new(&palette.yesterday),
                yesterday_opacity: palette.yesterday_opacity,
                today_opacity: palette.today_opacity,
                annotation: Color::new(&palette.annotation),
                hour_label: Color::new(&palette.hour_label),
                now_marker: Color::new(&palette.now_marker),
            },
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.chart.window().context("invalid chart window")?;
        anyhow::ensure!(
            self.provider.poll_interval_secs > 0,
            "provider.poll_interval_secs must be positive"
        );
        anyhow::ensure!(
            self.chart.width > 0.0 && self.chart.height > 0.0,
            "chart canvas must have a positive size"
        );
        anyhow::ensure!(
            (-90.0..=90.0).contains(&self.location.latitude)
                && (-180.0..=180.0).contains(&self.location.longitude),
            "location is outside valid latitude/longitude ranges"
        );
        Ok(())
    }
}

/// Defaults, then `config/widget.*` if present, then `WIDGET__SECTION__KEY`
/// environment variables.
pub fn load_widget_config() -> anyhow::Result<WidgetConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widget").required(false))
        .add_source(
            config::Environment::with_prefix("WIDGET")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let widget_config: WidgetConfig = settings.try_deserialize()?;
    widget_config.validate()?;
    Ok(widget_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> WidgetConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_match_shipped_widget() {
        let config = from_toml("");
        assert_eq!(config.provider.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.chart.window().unwrap().hours(), 16);
        assert_eq!(config.chart.layout().baseline_y, 180.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = from_toml(
            r##"
            [location]
            latitude = 52.37

            [chart]
            window_start_hour = 6
            scale_y = 4.0

            [chart.palette]
            warmer = "#ff0000"
            "##,
        );

        assert_eq!(config.location.latitude, 52.37);
        assert_eq!(config.location.longitude, -122.4311703);
        assert_eq!(config.chart.window().unwrap().hours(), 17);

        let layout = config.chart.layout();
        assert_eq!(layout.scale_y, 4.0);
        assert_eq!(layout.palette.warmer, Color::new("#ff0000"));
        assert_eq!(layout.palette.cooler, Color::new("#6969ff"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = WidgetConfig::default();
        config.chart.window_start_hour = 23;
        config.chart.window_end_hour = 7;
        assert!(config.validate().is_err());

        let mut config = WidgetConfig::default();
        config.provider.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = WidgetConfig::default();
        config.location.latitude = 120.0;
        assert!(config.validate().is_err());
    }
}
