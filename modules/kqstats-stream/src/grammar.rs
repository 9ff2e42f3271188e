//! Line grammar and tokenizer.
//!
//! Wire format: `(<epoch>,)?![k[<key>],v[<value1>,<value2>,...]]!`

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DecodeError, Result};

/// The message body. Matched anywhere in the line.
static MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[k\[([a-zA-Z: ]+)\],v\[([^\]]+)\]\]!").unwrap());

/// Optional epoch prefix. Anchored so digits inside the body are never read as a timestamp.
static EPOCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+),").unwrap());

static NON_ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z]+").unwrap());

/// A validated line split into its parts. Borrows from the raw line except
/// for the case-folded key and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub epoch: Option<&'a str>,
    /// Letters only, lower-cased.
    pub key: String,
    /// Positional, lower-cased, in wire order.
    pub values: Vec<String>,
}

/// True if the line conforms to the stats grammar.
pub fn validate(line: &str) -> bool {
    MESSAGE_RE.is_match(line)
}

/// Split a line into epoch, key and values. Rejects lines that fail [`validate`].
pub fn tokenize(line: &str) -> Result<Tokens<'_>> {
    let (epoch, body) = match EPOCH_RE.captures(line) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            (caps.get(1).map(|m| m.as_str()), &line[whole..])
        }
        None => (None, line),
    };

    let caps = MESSAGE_RE
        .captures(body)
        .ok_or_else(|| DecodeError::Validation(line.to_string()))?;

    let key = NON_ALPHA_RE
        .replace_all(&caps[1], "")
        .to_ascii_lowercase();
    let values = caps[2]
        .to_lowercase()
        .split(',')
        .map(str::to_string)
        .collect();

    Ok(Tokens { epoch, key, values })
}
