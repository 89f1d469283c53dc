//! Line-based interactive choices.
//!
//! Every prompt blocks until the operator enters a valid value; invalid
//! entries are reported and asked again without limit. Quitting a menu, or
//! closing the input, yields [`Choice::Cancelled`] rather than an error.

use std::cmp::Ordering;
use std::io::{self, BufRead, Write};

use crate::plugin::PluginError;

/// Outcome of an interactive step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Choice<T> {
    Selected(T),
    /// The operator quit; nothing more should happen.
    Cancelled,
}

impl<T> Choice<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Choice<U> {
        match self {
            Choice::Selected(value) => Choice::Selected(f(value)),
            Choice::Cancelled => Choice::Cancelled,
        }
    }

    pub fn selected(self) -> Option<T> {
        match self {
            Choice::Selected(value) => Some(value),
            Choice::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Choice::Cancelled)
    }
}

/// Unwrap a [`Choice`], returning `Ok(Choice::Cancelled)` from the enclosing
/// function when the operator quit.
macro_rules! selected {
    ($choice:expr) => {
        match $choice {
            $crate::prompt::Choice::Selected(value) => value,
            $crate::prompt::Choice::Cancelled => {
                return Ok($crate::prompt::Choice::Cancelled)
            }
        }
    };
}
pub(crate) use selected;

/// The channel prompts are written to and answers read from.
pub trait PromptIo {
    /// Next input line without its line terminator, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn print(&mut self, text: &str) -> io::Result<()>;
}

/// Reads standard input, writes to standard error so that standard output
/// stays clean for results.
#[derive(Debug, Default)]
pub struct StdPrompt;

impl PromptIo for StdPrompt {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(text.as_bytes())?;
        stderr.flush()
    }
}

/// Menus, free-text and bounded integer prompts over a [`PromptIo`].
pub struct Chooser<P> {
    io: P,
}

impl<P: PromptIo> Chooser<P> {
    pub fn new(io: P) -> Self {
        Self { io }
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    fn say(&mut self, text: &str) -> Result<(), PluginError> {
        self.io.print(text).map_err(PluginError::Prompt)
    }

    fn ask(&mut self) -> Result<Option<String>, PluginError> {
        self.io
            .read_line()
            .map(|line| line.map(|l| l.trim().to_string()))
            .map_err(PluginError::Prompt)
    }

    /// Numbered menu with `[0] Quit`, items kept in the given order.
    pub fn choose_from_list<T>(
        &mut self,
        title: &'static str,
        mut items: Vec<T>,
        render: impl Fn(&T) -> String,
    ) -> Result<Choice<T>, PluginError> {
        if items.is_empty() {
            return Err(PluginError::EmptyChoices(title));
        }

        let mut menu = format!("Choose {}:\n[0] Quit\n", title);
        for (index, item) in items.iter().enumerate() {
            menu.push_str(&format!("[{}] {}\n", index + 1, render(item)));
        }
        self.say(&menu)?;

        loop {
            let Some(line) = self.ask()? else {
                return Ok(Choice::Cancelled);
            };
            match line.parse::<usize>() {
                Ok(0) => return Ok(Choice::Cancelled),
                Ok(n) if n <= items.len() => return Ok(Choice::Selected(items.swap_remove(n - 1))),
                _ => self.say(&format!(
                    "Invalid choice '{}', please enter a number between 0 and {}\n",
                    line,
                    items.len()
                ))?,
            }
        }
    }

    /// [`Self::choose_from_list`] after sorting with `compare`.
    pub fn choose_from_sorted_list<T>(
        &mut self,
        title: &'static str,
        mut items: Vec<T>,
        render: impl Fn(&T) -> String,
        compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<Choice<T>, PluginError> {
        items.sort_by(compare);
        self.choose_from_list(title, items, render)
    }

    /// Free text checked by `validate`; an empty answer takes `default` when
    /// there is one.
    pub fn choose_string(
        &mut self,
        title: &str,
        validate: impl Fn(&str) -> Result<(), String>,
        default: Option<&str>,
    ) -> Result<Choice<String>, PluginError> {
        match default {
            Some(default) => self.say(&format!("{} [default: {}]:\n", title, default))?,
            None => self.say(&format!("{}:\n", title))?,
        }

        loop {
            let Some(line) = self.ask()? else {
                return Ok(Choice::Cancelled);
            };
            if line.is_empty() {
                match default {
                    Some(default) => return Ok(Choice::Selected(default.to_string())),
                    None => {
                        self.say("A value is required\n")?;
                        continue;
                    }
                }
            }
            match validate(&line) {
                Ok(()) => return Ok(Choice::Selected(line)),
                Err(reason) => self.say(&format!("{}\n", reason))?,
            }
        }
    }

    /// Integer in `[min, max_exclusive)`.
    pub fn choose_int(
        &mut self,
        title: &str,
        min: u32,
        max_exclusive: u32,
    ) -> Result<Choice<u32>, PluginError> {
        self.say(&format!(
            "{} (between {} and {}):\n",
            title,
            min,
            max_exclusive.saturating_sub(1)
        ))?;

        loop {
            let Some(line) = self.ask()? else {
                return Ok(Choice::Cancelled);
            };
            match line.parse::<u32>() {
                Ok(n) if (min..max_exclusive).contains(&n) => return Ok(Choice::Selected(n)),
                _ => self.say(&format!(
                    "Invalid number '{}', please enter a number between {} and {}\n",
                    line,
                    min,
                    max_exclusive.saturating_sub(1)
                ))?,
            }
        }
    }
}
