//! Splits an argument body into a preamble and prefix-tagged values.
//!
//! A prefix such as `grp/` is only recognized when it starts the body or
//! follows whitespace, and only if the command lists it. Everything else,
//! including unlisted prefixes, is part of the surrounding value. Values run
//! up to the next recognized prefix and are trimmed.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Grp,
    Path,
    Name,
    Id,
    Lsn,
    Qn,
    Idx,
    Score,
}

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grp => "grp/",
            Self::Path => "path/",
            Self::Name => "name/",
            Self::Id => "id/",
            Self::Lsn => "lsn/",
            Self::Qn => "qn/",
            Self::Idx => "idx/",
            Self::Score => "score/",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokenized arguments of one command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first recognized prefix
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The last value given for `prefix`
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }
}

pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let positions = find_prefix_positions(args, prefixes);

    let preamble_end = positions.first().map_or(args.len(), |(start, _)| *start);
    let mut multimap = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (i, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(args[value_start..value_end].trim().to_string());
    }

    multimap
}

fn find_prefix_positions(args: &str, prefixes: &[Prefix]) -> Vec<(usize, Prefix)> {
    let mut positions = Vec::new();
    let mut previous_is_boundary = true;

    for (i, ch) in args.char_indices() {
        if previous_is_boundary {
            let rest = &args[i..];
            if let Some(prefix) = prefixes.iter().find(|p| rest.starts_with(p.as_str())) {
                positions.push((i, *prefix));
            }
        }
        previous_is_boundary = ch.is_whitespace();
    }

    positions
}
