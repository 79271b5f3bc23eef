use std::fmt;
use std::io::{BufRead, Write};

use canteen_core::billing::round_currency;
use rust_decimal::Decimal;

use crate::console::ConsoleError;

const INVALID_NUMBER: &str = "  [!] Invalid input. Please enter a number: ";
const INVALID_PRICE: &str = "  [!] Invalid price. Enter a number: ";
const NEGATIVE_PRICE: &str = "  [!] Price cannot be negative. Enter a non-negative number: ";

/// Line-oriented prompts over any reader/writer pair. Malformed input re-prompts
/// until it is valid; only a closed input stream ends a read.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Free text, embedded spaces kept, empty lines allowed.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.ask(prompt)?;
        self.next_line()
    }

    pub fn read_integer(&mut self, prompt: &str) -> Result<i64, ConsoleError> {
        self.ask(prompt)?;
        loop {
            let line = self.next_line()?;
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.ask(INVALID_NUMBER)?,
            }
        }
    }

    /// Non-negative decimal, normalised to currency precision.
    pub fn read_price(&mut self, prompt: &str) -> Result<Decimal, ConsoleError> {
        self.ask(prompt)?;
        loop {
            let line = self.next_line()?;
            match line.trim().parse::<Decimal>() {
                Ok(price) if price.is_sign_negative() && !price.is_zero() => {
                    self.ask(NEGATIVE_PRICE)?
                }
                Ok(price) => return Ok(round_currency(price)),
                Err(_) => self.ask(INVALID_PRICE)?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<(), ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(())
    }

    fn next_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }

        let content_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(content_len);
        Ok(line)
    }
}
