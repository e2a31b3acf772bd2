// Server module entry point
// Listener creation, the accept loop, per-connection serving and Ctrl+C handling

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), so use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::run;
pub use signal::{start_signal_handler, ShutdownSignal};
