//! Interfaz de línea de comandos: subcomandos `find` y `rank`.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_find, handle_rank};
