pub mod history;
pub mod init;
pub mod render;

pub use history::{history, HistoryArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
