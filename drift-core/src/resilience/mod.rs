//! Process-level failure handling

pub mod panic;

pub use panic::install_panic_handler;
