use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing for consistent user-facing
/// messages. Colors are enabled only when the stream is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Print a plain user-facing line (no prefix). Used for the primary move
/// report ("<src> -> <dst>") and verbose skip lines, which users may script
/// against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
