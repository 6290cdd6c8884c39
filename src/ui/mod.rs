pub mod formatting;
pub mod terminal;

pub use terminal::TerminalView;
