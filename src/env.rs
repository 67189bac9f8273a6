// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! Loader environment: newline separated `key=value` text, NUL terminated,
//! at most one page.

use heapless::Vec;

use crate::bootinfo::BOOTBOOT_ENV;

pub const ENV_MAX: usize = 4096;
pub const MAX_VARS: usize = 32;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EnvVar<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

pub struct Environment<'a> {
    vars: Vec<EnvVar<'a>, MAX_VARS>,
    dropped: usize,
}

impl<'a> Environment<'a> {
    /// Parses up to the first NUL (or the end of `raw`). Invalid UTF-8 cuts the
    /// text at the last valid byte.
    pub fn parse(raw: &'a [u8]) -> Self {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let raw = &raw[..end];
        let text = match core::str::from_utf8(raw) {
            Ok(t) => t,
            // valid_up_to() is a char boundary
            Err(e) => core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or(""),
        };

        let mut vars = Vec::new();
        let mut dropped = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let var = EnvVar {
                key: key.trim(),
                value: value.trim(),
            };
            if vars.push(var).is_err() {
                dropped += 1;
            }
        }
        Self { vars, dropped }
    }

    /// The page the loader mapped at [`BOOTBOOT_ENV`].
    ///
    /// # Safety
    /// Only valid when running under a BOOTBOOT loader.
    pub unsafe fn get() -> Environment<'static> {
        let raw = unsafe { core::slice::from_raw_parts(BOOTBOOT_ENV as *const u8, ENV_MAX) };
        Environment::parse(raw)
    }

    /// Last definition wins.
    pub fn get_var(&self, key: &str) -> Option<&'a str> {
        self.vars.iter().rev().find(|v| v.key == key).map(|v| v.value)
    }

    pub fn vars(&self) -> &[EnvVar<'a>] {
        &self.vars
    }

    /// Lines that did not fit in the table.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_skips_comments() {
        let raw = b"// BOOTBOOT options\nscreen=1024x768\n\n# note\nkernel = sys/core \nbogus line\n\0trailing=ignored";
        let env = Environment::parse(raw);
        assert_eq!(env.vars().len(), 2);
        assert_eq!(env.get_var("screen"), Some("1024x768"));
        assert_eq!(env.get_var("kernel"), Some("sys/core"));
        assert_eq!(env.get_var("trailing"), None);
    }

    #[test]
    fn later_definition_wins() {
        let env = Environment::parse(b"smp=0\nsmp=1\n");
        assert_eq!(env.get_var("smp"), Some("1"));
    }

    #[test]
    fn overflow_is_counted() {
        let mut text = String::new();
        for i in 0..MAX_VARS + 3 {
            text.push_str(&format!("k{i}=v\n"));
        }
        let env = Environment::parse(text.as_bytes());
        assert_eq!(env.vars().len(), MAX_VARS);
        assert_eq!(env.dropped(), 3);
    }

    #[test]
    fn invalid_utf8_truncates() {
        let env = Environment::parse(b"a=1\nb=\xff\xfe\n");
        assert_eq!(env.get_var("a"), Some("1"));
        assert_eq!(env.get_var("b"), Some(""));
    }
}
