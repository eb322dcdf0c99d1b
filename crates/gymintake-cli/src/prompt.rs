//! Prompters for the intake session.
//!
//! `TermPrompter` uses dialoguer widgets when a user is sitting at a terminal.
//! `LinePrompter` reads one line per answer from any reader, which keeps the
//! form scriptable through pipes and in tests.

use std::io::{self, BufRead, Write};

use dialoguer::{Input, Password, Select};
use gymintake::Prompter;

/// Interactive prompter backed by dialoguer.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer))
    }

    fn secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(Some(answer))
    }

    fn menu(&mut self, title: &str, items: &[&str], _prompt: &str) -> io::Result<Option<String>> {
        // Escape cancels the menu, which ends the form like closed input
        let selection = Select::new()
            .with_prompt(title.trim_end_matches(':'))
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(selection.map(|index| (index + 1).to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        println!("{}", line);
        Ok(())
    }
}

/// Line-oriented prompter: writes `prompt: ` and reads up to the next newline.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.text(prompt)
    }

    fn menu(&mut self, title: &str, items: &[&str], prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", title)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        self.text(prompt)
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}
