//! Entry path matching.
//!
//! A pattern is either a literal path, compared for exact equality, or a
//! mask where `*` stands for any run of characters, `/` included. The depth
//! of an entry is the number of `/` in its path, so `1.csv` has depth 0 and
//! `folder/sub/4.csv` has depth 2.

use regex::Regex;

use crate::error::{Error, Result};

pub const WILDCARD: char = '*';

#[derive(Clone, Debug)]
enum Mask {
    Any,
    Literal(String),
    Wildcard(Regex),
}

#[derive(Clone, Debug)]
pub struct PathMatcher {
    pattern: String,
    mask:    Mask,
    depth:   Option<usize>,
}

impl PathMatcher {
    pub fn compile(pattern: &str, depth: Option<usize>) -> Result<Self> {
        let mask = if pattern.chars().all(|c| c == WILDCARD) && !pattern.is_empty() {
            Mask::Any
        } else if !pattern.contains(WILDCARD) {
            Mask::Literal(pattern.to_string())
        } else {
            let body = pattern
                .split(WILDCARD)
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            let regex = Regex::new(&format!("^(?s:{body})$")).map_err(|source| {
                Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?;
            Mask::Wildcard(regex)
        };

        Ok(Self {
            pattern: pattern.to_string(),
            mask,
            depth,
        })
    }

    /// Matcher accepting every entry at any depth.
    pub fn all() -> Self {
        Self {
            pattern: WILDCARD.to_string(),
            mask:    Mask::Any,
            depth:   None,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        if let Some(limit) = self.depth
            && depth_of(path) > limit
        {
            return false;
        }
        match &self.mask {
            Mask::Any => true,
            Mask::Literal(literal) => literal == path,
            Mask::Wildcard(regex) => regex.is_match(path),
        }
    }

    pub fn pattern(&self) -> &str { &self.pattern }

    pub fn depth_limit(&self) -> Option<usize> { self.depth }

    pub fn is_literal(&self) -> bool { matches!(self.mask, Mask::Literal(_)) }
}

/// Number of directory levels between the archive root and `path`.
pub fn depth_of(path: &str) -> usize { path.matches('/').count() }
