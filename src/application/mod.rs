// Application layer - Use cases and ports
pub mod forecast_provider;
pub mod forecast_service;
pub mod poller;
pub mod scene_renderer;
pub mod widget_service;
