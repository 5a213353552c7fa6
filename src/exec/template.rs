// src/exec/template.rs

//! Command templates with `{name}` placeholders.
//!
//! ```
//! use pkgowner::exec::CommandSpec;
//!
//! let cmd = CommandSpec::new("{dpkg-query} -S {files}")
//!     .with("dpkg-query", "/usr/bin/dpkg-query")
//!     .with("files", "/bin/ls")
//!     .render()
//!     .unwrap();
//! assert_eq!(cmd, "/usr/bin/dpkg-query -S /bin/ls");
//! ```
//!
//! Placeholder names may contain any character except braces. `{{` and `}}`
//! render as literal braces.

use std::collections::BTreeMap;

use crate::errors::{PkgownerError, Result};

/// A command template plus the values for its placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub template: String,
    pub substitutions: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            substitutions: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    /// Add every entry of `values`, overwriting existing keys.
    pub fn with_all<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in values {
            self.substitutions.insert(k.into(), v.into());
        }
        self
    }

    /// Substitute every placeholder.
    ///
    /// Fails with [`PkgownerError::CommandFormat`] when a placeholder has no
    /// value or the braces are unbalanced.
    pub fn render(&self) -> Result<String> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '{' => {
                    let mut key = String::new();
                    let mut closed = false;
                    for k in chars.by_ref() {
                        match k {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(self.format_error("nested '{' in placeholder")),
                            _ => key.push(k),
                        }
                    }
                    if !closed {
                        return Err(self.format_error("unterminated placeholder"));
                    }
                    let value = self
                        .substitutions
                        .get(&key)
                        .ok_or_else(|| self.format_error(format!("no value for '{{{key}}}'")))?;
                    out.push_str(value);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '}' => return Err(self.format_error("single '}' encountered")),
                _ => out.push(c),
            }
        }

        Ok(out)
    }

    fn format_error(&self, reason: impl Into<String>) -> PkgownerError {
        PkgownerError::CommandFormat {
            template: self.template.clone(),
            reason: reason.into(),
        }
    }
}
