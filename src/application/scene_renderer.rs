// Renderer trait for turning a scene into a concrete display format
use crate::domain::scene::Scene;

pub trait SceneRenderer: Send + Sync {
    /// MIME type of the rendered document.
    fn content_type(&self) -> &'static str;

    fn render(&self, scene: &Scene) -> anyhow::Result<String>;
}
