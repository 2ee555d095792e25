//! Read-only configuration seams: boot command line and process environment.
//!
//! Scheme resolution consumes both sources through narrow traits so tests
//! and embedders can substitute fixed values. Absence is never an error on
//! either seam.

use std::fs;
use std::path::PathBuf;

/// Location of the kernel command line on a running system.
const PROC_CMDLINE: &str = "/proc/cmdline";

/// One-shot lookup of boot command-line parameters.
#[cfg_attr(test, mockall::automock)]
pub trait BootParams {
    /// Returns the value of `key` when the command line carries `key=value`,
    /// `None` otherwise.
    fn get_key(&self, key: &str) -> Option<String>;
}

/// Process environment lookup.
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Returns the value of the environment variable `name`, if set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Boot parameters sourced from the kernel's `/proc/cmdline`.
#[derive(Clone, Debug)]
pub struct ProcCmdline {
    path: PathBuf,
}

impl ProcCmdline {
    /// Creates a reader over the kernel command line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(PROC_CMDLINE),
        }
    }

    /// Creates a reader over an alternative command-line file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcCmdline {
    fn default() -> Self {
        Self::new()
    }
}

impl BootParams for ProcCmdline {
    fn get_key(&self, key: &str) -> Option<String> {
        // An unreadable command line reads as "no parameters set"; callers
        // treat absence as a non-error.
        let contents = fs::read_to_string(&self.path).ok()?;
        lookup_key(&contents, key)
    }
}

/// Environment lookup backed by the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Extracts `key=value` from a whitespace-separated parameter list.
///
/// Bare switches carry no value and never match. Values quoted with spaces
/// are not reassembled; the scheme keys this crate reads are single tokens.
fn lookup_key(cmdline: &str, key: &str) -> Option<String> {
    cmdline.split_whitespace().find_map(|token| {
        let (name, value) = token.split_once('=')?;
        (name == key).then(|| unquote(value).to_owned())
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(value)
}
