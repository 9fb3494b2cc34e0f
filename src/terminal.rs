//! Terminal detection.
//!
//! Decides whether a destination is a live console. The answer is taken once
//! when a sink is created; later redirection of the same descriptor is not
//! observed.

use std::io::IsTerminal;

/// True only when `dest` is attached to an interactive terminal. Files,
/// pipes and anything that is not a file descriptor report false.
pub fn is_interactive<D: IsTerminal>(dest: &D) -> bool {
    dest.is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_file_is_not_interactive() {
        let file = tempfile::tempfile().unwrap();
        assert!(!is_interactive(&file));
    }

    #[test]
    fn test_named_file_is_not_interactive() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_interactive(file.as_file()));
    }
}
