//! Minimal ANSI color helpers for the progress line and export log output.

const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const CYAN: &str = "\x1b[1;36m";
const GREY: &str = "\x1b[1;30m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn colorize(input: &str, color: &str) -> String {
    format!("{}{}{}", color, input, RESET)
}

#[must_use]
pub fn green(input: &str) -> String {
    colorize(input, GREEN)
}

#[must_use]
pub fn yellow(input: &str) -> String {
    colorize(input, YELLOW)
}

#[must_use]
pub fn cyan(input: &str) -> String {
    colorize(input, CYAN)
}

#[must_use]
pub fn grey(input: &str) -> String {
    colorize(input, GREY)
}

#[must_use]
pub fn bold(input: &str) -> String {
    colorize(input, BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorized_text_is_reset() {
        let out = green("ok");
        assert!(out.starts_with(GREEN));
        assert!(out.ends_with(RESET));
        assert!(out.contains("ok"));
    }
}
