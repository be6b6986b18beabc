// Popup layer - the user-facing adapter: controller state machine and views.

#[path = "controller.rs"]
pub mod controller;

#[path = "terminal.rs"]
pub mod terminal;

pub use controller::{Panel, PopupController, PopupView};
pub use terminal::TerminalView;
