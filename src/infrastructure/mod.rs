// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod json_renderer;
pub mod open_meteo;
pub mod svg_renderer;
