//! Prompts for the interactive session.
//!
//! [`Ask`] is what the session talks to. [`TermPrompter`] drives a real
//! terminal with `dialoguer` menus and validated inputs; [`Prompter`] reads
//! plain lines and is used when input is piped (and by the tests).
//!
//! Every method returns `Ok(None)` when input ends (Ctrl-D, closed pipe) or
//! the operator backs out of a menu, so callers can unwind back to the menu
//! and exit cleanly. Numeric prompts repeat until the answer parses.

use std::io::{self, BufRead, Write};

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use quote_core::duration::PrintDuration;
use quote_core::units::parse_decimal;

const DURATION_HINT: &str = "e.g. 2h, 90m, 1d 2h 30m";

pub trait Ask {
    /// Writer for reports shown between questions
    fn out(&mut self) -> &mut dyn Write;

    /// Pick one of `items`; index into `items`.
    fn choose(&mut self, title: &str, items: &[&str]) -> io::Result<Option<usize>>;

    /// Free text; an empty answer takes `default`.
    fn text(&mut self, label: &str, default: &str) -> io::Result<Option<String>>;

    /// Decimal number ("12,5" accepted); an empty answer takes `default`
    /// when there is one.
    fn number(&mut self, field: &str, label: &str, default: Option<f64>) -> io::Result<Option<f64>>;

    /// Whole number of at least 1; an empty answer takes `default`.
    fn count(&mut self, label: &str, default: u32) -> io::Result<Option<u32>>;

    /// Print time; repeats until it parses and is not zero.
    fn duration(&mut self, label: &str) -> io::Result<Option<PrintDuration>>;

    /// Yes/no question; an empty answer takes `default`.
    fn confirm(&mut self, label: &str, default: bool) -> io::Result<Option<bool>>;
}

fn parse_count(answer: &str) -> Result<u32, String> {
    match answer.trim().parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err("Enter a whole number of at least 1.".to_string()),
    }
}

fn parse_duration(answer: &str) -> Result<PrintDuration, String> {
    answer
        .parse::<PrintDuration>()
        .and_then(|d| d.validate().map(|_| d))
        .map_err(|e| e.to_string())
}

/// Line-based prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one trimmed line. `None` at end of input.
    pub fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Ask for Prompter<R, W> {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    /// Numbered list; `q` or `b` backs out.
    fn choose(&mut self, _title: &str, items: &[&str]) -> io::Result<Option<usize>> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, item)?;
        }
        loop {
            let Some(answer) = self.line("> ")? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "" => continue,
                "q" | "quit" | "exit" | "b" | "back" => return Ok(None),
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
                    _ => writeln!(self.output, "Unknown option '{}'.", other)?,
                },
            }
        }
    }

    fn text(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        let prompt = if default.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, default)
        };
        Ok(self.line(&prompt)?.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    fn number(&mut self, field: &str, label: &str, default: Option<f64>) -> io::Result<Option<f64>> {
        let prompt = match default {
            Some(value) => format!("{} [{}]: ", label, value),
            None => format!("{}: ", label),
        };
        loop {
            let Some(answer) = self.line(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                if let Some(value) = default {
                    return Ok(Some(value));
                }
            }
            match parse_decimal(field, &answer) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "  Not a number, try again.")?,
            }
        }
    }

    fn count(&mut self, label: &str, default: u32) -> io::Result<Option<u32>> {
        let prompt = format!("{} [{}]: ", label, default);
        loop {
            let Some(answer) = self.line(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match parse_count(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    fn duration(&mut self, label: &str) -> io::Result<Option<PrintDuration>> {
        let prompt = format!("{} ({}): ", label, DURATION_HINT);
        loop {
            let Some(answer) = self.line(&prompt)? else {
                return Ok(None);
            };
            match parse_duration(&answer) {
                Ok(duration) => return Ok(Some(duration)),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    fn confirm(&mut self, label: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "Y/n" } else { "y/N" };
        let prompt = format!("{} [{}]: ", label, hint);
        loop {
            let Some(answer) = self.line(&prompt)? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" | "s" | "si" | "sí" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "  Answer y or n.")?,
            }
        }
    }
}

/// Terminal prompts. Questions go to stderr through `dialoguer`; reports
/// go to stdout. Esc in a menu backs out.
pub struct TermPrompter {
    theme: ColorfulTheme,
    stdout: io::Stdout,
}

impl TermPrompter {
    pub fn new() -> Self {
        TermPrompter {
            theme: ColorfulTheme::default(),
            stdout: io::stdout(),
        }
    }

    fn input(&self, label: &str, default: Option<String>) -> Input<'_, String> {
        let input = Input::with_theme(&self.theme).with_prompt(label);
        match default {
            Some(value) => input.default(value),
            None => input,
        }
    }
}

impl Ask for TermPrompter {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn choose(&mut self, title: &str, items: &[&str]) -> io::Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(io::Error::other)
    }

    fn text(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        let default = (!default.is_empty()).then(|| default.to_string());
        let answer: String = self
            .input(label, default)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;
        Ok(Some(answer.trim().to_string()))
    }

    fn number(&mut self, field: &str, label: &str, default: Option<f64>) -> io::Result<Option<f64>> {
        let answer: String = self
            .input(label, default.map(|value| value.to_string()))
            .validate_with(|answer: &String| parse_decimal(field, answer).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()
            .map_err(io::Error::other)?;
        parse_decimal(field, &answer).map(Some).map_err(io::Error::other)
    }

    fn count(&mut self, label: &str, default: u32) -> io::Result<Option<u32>> {
        let answer: String = self
            .input(label, Some(default.to_string()))
            .validate_with(|answer: &String| parse_count(answer).map(|_| ()))
            .interact_text()
            .map_err(io::Error::other)?;
        parse_count(&answer).map(Some).map_err(io::Error::other)
    }

    fn duration(&mut self, label: &str) -> io::Result<Option<PrintDuration>> {
        let answer: String = self
            .input(&format!("{} ({})", label, DURATION_HINT), None)
            .validate_with(|answer: &String| parse_duration(answer).map(|_| ()))
            .interact_text()
            .map_err(io::Error::other)?;
        parse_duration(&answer).map(Some).map_err(io::Error::other)
    }

    fn confirm(&mut self, label: &str, default: bool) -> io::Result<Option<bool>> {
        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(default)
            .interact_opt()
            .map_err(io::Error::other)
    }
}
