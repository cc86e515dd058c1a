// JSON adapter exposing the scene graph as plain data
use crate::application::scene_renderer::SceneRenderer;
use crate::domain::scene::Scene;

#[derive(Debug, Clone, Default)]
pub struct JsonSceneRenderer;

impl SceneRenderer for JsonSceneRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, scene: &Scene) -> anyhow::Result<String> {
        Ok(serde_json::to_string(scene)?)
    }
}
