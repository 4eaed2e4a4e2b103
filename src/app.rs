use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::EditorError;
use crate::panels::{self, PropertyBuffer};
use crate::renderer::Renderer;
use crate::tools::ToolKind;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
/// Only settings survive a restart; the drawing itself is not saved.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorApp {
    config: EditorConfig,
    tool: ToolKind,
    #[serde(skip)]
    editor: Editor,
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    properties: PropertyBuffer,
    #[serde(skip)]
    last_error: Option<String>,
}

impl Default for EditorApp {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            editor: Editor::new(config.clone()),
            config,
            tool: ToolKind::default(),
            renderer: Renderer::new(),
            properties: PropertyBuffer::default(),
            last_error: None,
        }
    }
}

impl EditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = match cc.storage {
            Some(storage) => eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            None => Self::default(),
        };
        app.editor = Editor::new(app.config.clone());
        app.editor.set_tool(app.tool);

        let ctx = cc.egui_ctx.clone();
        app.editor.subscribe(Box::new(move || ctx.request_repaint()));
        log::info!("Editor ready with {:?}", app.config);
        app
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn properties_mut(&mut self) -> &mut PropertyBuffer {
        &mut self.properties
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tool = kind;
        self.editor.set_tool(kind);
    }

    /// Keeps the latest failure for the status line.
    pub fn report(&mut self, result: Result<(), EditorError>) {
        match result {
            Ok(()) => {}
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl eframe::App for EditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config = self.editor.config().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::properties_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
