//! Flat key preparation
//!
//! Turns the keys of a [`FlatConfig`] into path expressions the `config`
//! crate can apply as overrides, resolving the conflicts a flat namespace
//! allows but a tree does not.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::{BindError, MAX_INDEX};
use crate::config::FlatConfig;

/// One dotted segment: a name followed by any number of `[i]` subscripts
static SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)((?:\[[0-9]+\])*)$").expect("segment pattern is a valid regex")
});

static SUBSCRIPT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("subscript pattern is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'k> {
    Name(&'k str),
    Index(usize),
}

/// Prepare `(path, value)` overrides for every bindable entry
///
/// - empty dotted segments are dropped: `items[3].` is `items[3]`
/// - keys `config` cannot address (`[0].a`, `java(x86).home`) are skipped
/// - the value of a key that also has nested keys is skipped, so `user=root`
///   does not shadow `user.name=alice`
///
/// Fails when a subscript exceeds [`MAX_INDEX`] or when one parent has both
/// indexed and named children.
pub(crate) fn overrides(config: &FlatConfig) -> Result<BTreeMap<String, String>, BindError> {
    let mut leaves = BTreeMap::new();
    let mut branches = HashSet::new();
    let mut child_kinds: HashMap<String, bool> = HashMap::new();

    for (key, value) in config.iter() {
        let Some(steps) = parse(key)? else {
            tracing::trace!(key, "Skipping key that is not a bindable path");
            continue;
        };

        let mut path = String::new();
        for step in &steps {
            let indexed = matches!(step, Step::Index(_));
            if let Some(&seen) = child_kinds.get(&path)
                && seen != indexed
            {
                return Err(BindError::new(&path, "mixes indexed and named keys"));
            }
            child_kinds.insert(path.clone(), indexed);
            if !path.is_empty() {
                branches.insert(path.clone());
            }
            push_step(&mut path, *step);
        }

        leaves.insert(path, value.to_string());
    }

    leaves.retain(|path, _| {
        let branch = branches.contains(path);
        if branch {
            tracing::debug!(key = %path, "Ignoring value of a key that also has nested keys");
        }
        !branch
    });
    Ok(leaves)
}

/// Split a flat key into steps; `None` when it is not addressable
fn parse(key: &str) -> Result<Option<Vec<Step<'_>>>, BindError> {
    let mut steps = Vec::new();
    let mut path = String::new();

    for segment in key.split('.').filter(|s| !s.is_empty()) {
        let Some(captures) = SEGMENT_PATTERN.captures(segment) else {
            return Ok(None);
        };
        let name = captures.get(1).map_or("", |m| m.as_str());
        steps.push(Step::Name(name));
        push_step(&mut path, Step::Name(name));

        let subscripts = captures.get(2).map_or("", |m| m.as_str());
        for digits in SUBSCRIPT_PATTERN.captures_iter(subscripts) {
            let digits = digits.get(1).map_or("", |m| m.as_str());
            let index = digits
                .parse::<usize>()
                .ok()
                .filter(|&i| i <= MAX_INDEX)
                .ok_or_else(|| {
                    BindError::new(
                        &path,
                        format!("index {} exceeds the maximum of {}", digits, MAX_INDEX),
                    )
                })?;
            steps.push(Step::Index(index));
            push_step(&mut path, Step::Index(index));
        }
    }

    Ok((!steps.is_empty()).then_some(steps))
}

fn push_step(path: &mut String, step: Step<'_>) {
    match step {
        Step::Name(name) => {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(name);
        }
        Step::Index(index) => {
            path.push('[');
            path.push_str(&index.to_string());
            path.push(']');
        }
    }
}
