#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod component_manager;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod shape;
pub mod tools;

pub use app::EditorApp;
pub use command::{Command, CommandHistory, CommandResult, EditorCommand};
pub use component_manager::{ComponentManager, RemovedComponent};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::EditorError;
pub use geometry::Bound;
pub use id_generator::{ComponentId, IdGenerator};
pub use renderer::Renderer;
pub use selection::{HandlePosition, SelectedComponent};
pub use shape::{BoundPatch, Component, DrawableShape, Shape, Style};
pub use tools::{Tool, ToolKind, ToolType};
