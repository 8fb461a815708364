use colored::Colorize;
use prosody_spec::BackendError;

/// Prints a coded diagnostic to stderr: `error[E002]: ...`.
pub(crate) fn print_backend_error<E: BackendError + ?Sized>(err: &E) {
    eprintln!(
        "{}: {}",
        format!("error[{}]", err.code()).red().bold(),
        err.message()
    );
}

/// Prints captured job output, indented and dimmed.
pub(crate) fn print_captured(label: &str, text: &str) {
    let text = text.trim_end();
    if text.is_empty() {
        return;
    }
    eprintln!("  {}", label.dimmed());
    for line in text.lines() {
        eprintln!("    {}", line.dimmed());
    }
}
