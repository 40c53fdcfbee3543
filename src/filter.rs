use std::fmt::Display;

// Substring scorer for inquire selects, earlier matches rank higher.
pub fn filter<T: Display>(input: &str, _option: &T, string_value: &str, _idx: usize) -> Option<i64> {
    let needle = input.to_lowercase();
    let pos = string_value.to_lowercase().find(&needle)?;

    i64::try_from(pos).ok().map(|pos| -pos)
}
