//! Argument-vector builder for `jj` invocations
//!
//! A [`CommandLine`] is an ordered list of discrete arguments, never a
//! pre-joined string. Builder methods append in call order, so the order in
//! which an operation calls them is the order the binary sees.

use std::fmt;

use crate::encode::{EncodedText, quote};

/// Program name used when a command line is displayed without an explicit
/// binary.
pub const DEFAULT_PROGRAM: &str = "jj";

/// A single argument of a [`CommandLine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Subcommands, flags, revisions, bookmark names, paths
    Plain(String),
    /// Free-form user text such as a change description
    Text(String),
}

impl Arg {
    /// The raw argument value, exactly as the binary receives it.
    pub fn as_str(&self) -> &str {
        match self {
            Arg::Plain(value) | Arg::Text(value) => value,
        }
    }
}

/// Ordered arguments for one `jj` invocation (binary name excluded)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<Arg>,
}

impl CommandLine {
    /// Start a command line from its subcommand words, e.g. `["git", "push"]`.
    pub fn new<I, S>(subcommand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: subcommand
                .into_iter()
                .map(|word| Arg::Plain(word.into()))
                .collect(),
        }
    }

    /// Append one plain argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(value.into()));
        self
    }

    /// Append several plain arguments.
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(values.into_iter().map(|value| Arg::Plain(value.into())));
        self
    }

    /// Append `flag` followed by free-form text.
    pub fn text(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(flag.to_string()));
        self.args.push(Arg::Text(value.into()));
        self
    }

    /// Append `flag value` when a value is present.
    pub fn option<S: Into<String>>(self, flag: &str, value: Option<S>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Append `flag value` once per value, preserving order.
    pub fn repeated<I, S>(mut self, flag: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(flag).arg(value);
        }
        self
    }

    /// Append a bare flag when `enabled`.
    pub fn switch(self, flag: &str, enabled: bool) -> Self {
        if enabled { self.arg(flag) } else { self }
    }

    /// The arguments in order.
    pub fn as_args(&self) -> &[Arg] {
        &self.args
    }

    /// The raw argument vector passed to the binary.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(Arg::as_str)
    }

    /// Human-readable form prefixed with `program`, every argument quoted
    /// with [`quote`]. Used in logs and failure text, never executed.
    pub fn display_with(&self, program: &str) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(quote(program).into_owned());
        words.extend(self.argv().map(|arg| quote(arg).into_owned()));
        words.join(" ")
    }

    /// Render a POSIX shell script that runs `program` with exactly these
    /// arguments.
    ///
    /// Plain arguments are quoted with [`quote`]. Each text argument is
    /// carried as an [`EncodedText`] token, decoded into a variable in a
    /// prelude and referenced as `"$var"` in the final command.
    pub fn to_shell_script(&self, program: &str) -> String {
        let mut prelude = Vec::new();
        let mut words = vec![quote(program).into_owned()];

        for (index, arg) in self.args.iter().enumerate() {
            match arg {
                Arg::Plain(value) => words.push(quote(value).into_owned()),
                Arg::Text(value) => {
                    let var = format!("jj_text_{index}");
                    prelude.push(EncodedText::new(value).assignment(&var));
                    words.push(EncodedText::reference(&var));
                }
            }
        }

        let command = words.join(" ");
        if prelude.is_empty() {
            command
        } else {
            format!("{}; {}", prelude.join("; "), command)
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_PROGRAM))
    }
}
