//! Drover - console output for the fenceline tools
//!
//! Status logging to stderr with colored level prefixes, banner display
//! for section breaks, and currency formatting for monetary values.
//! All status output goes to stderr so stdout stays clean for results.

use colored::*;

/// Write a (possibly multi-line) message to stderr.
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Format a colored, width-padded prefix for a log level tag.
fn prefix(color: Color, tag: &str) -> String {
  format!("[{}]{:<width$}", tag.color(color).bold(), "", width = 7usize.saturating_sub(tag.len() + 2))
}

fn emit(color: Color, tag: &str, message: &str) {
  let prefix = prefix(color, tag);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// General information.
pub fn info(message: &str) {
  emit(Color::Blue, "info", message);
}

/// Something needs attention.
pub fn warn(message: &str) {
  emit(Color::Yellow, "warn", message);
}

/// Something went wrong.
pub fn error(message: &str) {
  emit(Color::Red, "error", message);
}

/// Something completed successfully.
pub fn success(message: &str) {
  emit(Color::Green, "ok", message);
}

/// Detailed diagnostic information.
pub fn debug(message: &str) {
  emit(Color::Magenta, "debug", message);
}

/// A border line of the given length and character.
pub fn banner_line(length: usize, border_char: char) -> String {
  border_char.to_string().repeat(length)
}

/// Display a message between two border lines.
pub fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let width = width.unwrap_or(50);
  let border_char = border_char.unwrap_or('=');

  let banner = banner_line(width, border_char);

  log_fn(&banner);
  log_fn(message);
  log_fn(&banner);
}

/// Format a monetary amount with a dollar prefix and two decimals.
/// Negative amounts carry the sign ahead of the symbol: -$240.00.
pub fn money(amount: f64) -> String {
  // collapse -0.0 so it renders as $0.00
  let amount = if amount == 0.0 { 0.0 } else { amount };
  if amount < 0.0 {
    format!("-${:.2}", -amount)
  } else {
    format!("${amount:.2}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn money_formats_two_decimals_with_prefix() {
    assert_eq!(money(1234.5), "$1234.50");
    assert_eq!(money(58500.0), "$58500.00");
    assert_eq!(money(0.125), "$0.12");
  }

  #[test]
  fn money_keeps_sign_ahead_of_symbol() {
    assert_eq!(money(-240.0), "-$240.00");
    assert_eq!(money(-0.5), "-$0.50");
  }

  #[test]
  fn money_zero_is_unsigned() {
    assert_eq!(money(0.0), "$0.00");
    assert_eq!(money(-0.0), "$0.00");
  }

  #[test]
  fn banner_line_repeats_character() {
    assert_eq!(banner_line(5, '='), "=====");
    assert_eq!(banner_line(0, '*'), "");
  }

  #[test]
  fn as_banner_wraps_message() {
    let collected = std::cell::RefCell::new(Vec::new());
    as_banner(|line| collected.borrow_mut().push(line.to_string()), "howdy", Some(3), Some('-'));
    assert_eq!(collected.into_inner(), vec!["---", "howdy", "---"]);
  }
}
