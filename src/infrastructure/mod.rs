//! Infrastructure layer: presentation adapters
//!
//! This layer implements the presentation boundary trait for the terminal.

pub mod render;
pub mod terminal;
pub mod traits;

pub use render::TreeRender;
pub use terminal::TerminalPresenter;
pub use traits::Presenter;
