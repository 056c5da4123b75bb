//! Non-interactive playback: single file and piped stdin, with a plain
//! text header and an in-place progress line instead of the TUI.

mod console;
mod file;
mod stdin;

pub use file::run_file_mode;
pub use stdin::run_stdin_mode;
