// Application state for HTTP handlers
use crate::application::widget_service::WidgetService;
use crate::infrastructure::json_renderer::JsonSceneRenderer;
use crate::infrastructure::svg_renderer::SvgRenderer;

#[derive(Clone)]
pub struct AppState {
    pub widget_service: WidgetService,
    pub svg_renderer: SvgRenderer,
    pub json_renderer: JsonSceneRenderer,
    pub refresh_secs: u64,
}
