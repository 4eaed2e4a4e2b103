mod central_panel;
mod properties_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use properties_panel::{properties_panel, PropertyBuffer};
pub use tools_panel::tools_panel;
