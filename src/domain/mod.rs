// Domain layer - Forecast data, chart geometry and the scene graph
pub mod chart;
pub mod forecast;
pub mod scene;
