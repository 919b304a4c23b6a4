//! Shell-safe argument encoding
//!
//! Commands are executed as argument vectors by default, so no value ever
//! passes through a shell. These helpers are used when a [`CommandLine`]
//! is rendered for a shell (see [`crate::ExecMode::Shell`]) and for the
//! human-readable form of a command in logs and error text.
//!
//! Two rules apply, one per argument kind:
//!
//! - Plain values (flags, revisions, bookmark names, paths) use [`quote`].
//! - Free-form text (descriptions) uses [`EncodedText`]: the value travels as
//!   a base64 token and is decoded into a shell variable before use, so
//!   quotes, newlines and `$` in the text are never seen by the shell.
//!
//! [`CommandLine`]: crate::CommandLine

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Result;

/// Quote a plain value for a POSIX shell.
///
/// Values made only of characters with no shell meaning are returned as-is.
/// Anything else is wrapped in single quotes, with embedded `'` written as
/// `'\''`. The empty string becomes `''`.
pub fn quote(raw: &str) -> Cow<'_, str> {
    if !raw.is_empty() && raw.chars().all(is_shell_safe) {
        return Cow::Borrowed(raw);
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('\'');
    for c in raw.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '%' | '+' | '=' | ',')
}

/// Free-form text encoded for transport through a shell.
///
/// The token uses the standard base64 alphabet, so it contains no
/// whitespace, quotes or shell metacharacters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    token: String,
}

impl EncodedText {
    /// Encode the UTF-8 bytes of `raw`.
    pub fn new(raw: &str) -> Self {
        Self {
            token: STANDARD.encode(raw.as_bytes()),
        }
    }

    /// The base64 token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Shell statements assigning the decoded text to `var`.
    ///
    /// Command substitution strips trailing newlines, so a sentinel `x` is
    /// appended inside the substitution and removed afterwards. The variable
    /// then holds the original text byte-for-byte.
    pub fn assignment(&self, var: &str) -> String {
        format!(
            "{var}=\"$(printf '%s' '{token}' | base64 -d; printf x)\"; {var}=\"${{{var}%x}}\"",
            token = self.token
        )
    }

    /// Reference to a variable set by [`EncodedText::assignment`], as a
    /// single shell word.
    pub fn reference(var: &str) -> String {
        format!("\"${var}\"")
    }

    /// Decode the token back to text.
    pub fn decode(&self) -> Result<String> {
        let bytes = STANDARD.decode(&self.token)?;
        Ok(String::from_utf8(bytes)?)
    }
}
