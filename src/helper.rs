use std::process;

use clap::ArgMatches;
use log::warn;

/// Numeric flag lookup with an interactive fallback. Zero means unset.
pub fn get_numeric_input<F>(field: &str, matches: &ArgMatches, callback: Option<F>, quiet: bool) -> i32
where
    F: FnOnce() -> i32,
{
    matches
        .get_one::<i32>(field)
        .map(std::borrow::ToOwned::to_owned)
        .map_or_else(
            || {
                if quiet {
                    warn!("Could not ask for input");
                    process::exit(1);
                } else if let Some(callback) = callback {
                    callback()
                } else {
                    0
                }
            },
            |value| value,
        )
}
