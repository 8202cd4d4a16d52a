//! Folding flag occurrences into environment variable values

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::OptionDef;

/// Final environment variable values, keyed by variable name
pub type EnvOverrides = BTreeMap<&'static str, String>;

/// Record one occurrence of `option` with an already normalized value
///
/// List options append after any previous value using their separator.
/// Everything else overwrites, so the last occurrence wins.
pub fn accumulate(env: &mut EnvOverrides, option: &OptionDef, value: String) {
    match (option.separator, env.entry(option.env_var)) {
        (Some(separator), Entry::Occupied(mut entry)) => {
            let existing = entry.get_mut();
            existing.push_str(separator.as_str());
            existing.push_str(&value);
        }
        (None, Entry::Occupied(mut entry)) => {
            entry.insert(value);
        }
        (_, Entry::Vacant(entry)) => {
            entry.insert(value);
        }
    }
}

/// Fold an ordered sequence of `(option, normalized value)` pairs
pub fn fold<I>(occurrences: I) -> EnvOverrides
where
    I: IntoIterator<Item = (&'static OptionDef, String)>,
{
    let mut env = EnvOverrides::new();
    for (option, value) in occurrences {
        accumulate(&mut env, option, value);
    }
    env
}
