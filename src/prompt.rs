use std::process;

use clap::ArgMatches;
use inquire::{required, Text};

#[allow(clippy::module_name_repetitions)]
pub fn ask_prompt(text: &str, required: bool, default: &str) -> String {
    let mut prompt = Text::new(text);
    if required {
        prompt = prompt.with_validator(required!());
    }

    if !default.is_empty() {
        prompt = prompt.with_default(default);
    }

    prompt.prompt().unwrap_or_else(|_| {
        process::exit(1);
    })
}

pub fn get_match_string(
    matches: &ArgMatches,
    quiet: bool,
    match_id: &str,
    prompt_text: &str,
    default: &str,
    required: bool,
) -> String {
    if let Some(value) = matches.get_one::<String>(match_id) {
        if value.is_empty() && !quiet {
            ask_prompt(prompt_text, required, default)
        } else {
            value.clone()
        }
    } else {
        if !quiet {
            return ask_prompt(prompt_text, required, default);
        }

        default.to_owned()
    }
}
