use std::error::Error;
use std::process;
use std::str::FromStr;

use chrono::Local;
use clap::{arg, ArgMatches, Command};
use colored::Colorize;
use inquire::Select;
use log::{error, warn};
use rand::Rng;

use crate::api::car::{Car, Gearbox};
use crate::api::entity::Entity;
use crate::api::supported::{ask_for_brand, ask_for_model, SupportedCar};
use crate::api::{AppError, Client};
use crate::helper;
use crate::listing::year_options;
use crate::prompt::get_match_string;

pub const COMMAND_NAME: &str = "new";

const ID_LENGTH: usize = 6;
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[allow(clippy::cognitive_complexity)]
pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .visible_aliases(["add", "post"])
        .short_flag('n')
        .short_flag_alias('a')
        .about("Post a new car listing")
        .arg(arg!(-b --brand <BRAND> "Car brand").required(false))
        .arg(arg!(-m --model <MODEL> "Car model").required(false))
        .arg(
            arg!(-y --year <YEAR> "Manufacture year")
                .required(false)
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(arg!(-g --gearbox <GEARBOX> "Gearbox type (Automatic or Manual)").required(false))
        .arg(arg!(--color <COLOR> "Car color").required(false))
        .arg(arg!(--photo <URL> "Photo url, taken from the supported brand data when omitted").required(false))
}

pub fn command(matches: &ArgMatches, api_client: &dyn Client, quiet: bool) -> Result<u8, Box<dyn Error>> {
    let user_id = api_client.get_config().user_id.clone();
    if user_id.is_empty() {
        Err(AppError("No userId configured, set it in the config file".to_owned()))?;
    }

    let supported = api_client.get_supported_cars().unwrap_or_else(|e| {
        error!("{e} while trying to list supported brands");
        vec![]
    });

    let brand = matches.get_one::<String>("brand").cloned().unwrap_or_else(|| {
        if quiet {
            String::new()
        } else {
            ask_for_brand(&supported)
        }
    });

    let model = matches.get_one::<String>("model").cloned().unwrap_or_else(|| {
        if quiet {
            String::new()
        } else {
            ask_for_model(&supported, &brand)
        }
    });

    let make_year = helper::get_numeric_input("year", matches, Some(ask_for_year), quiet);

    let gearbox = matches
        .get_one::<String>("gearbox")
        .map(|value| Gearbox::from_str(value))
        .transpose()
        .map_err(AppError)?
        .or_else(|| if quiet { None } else { Some(ask_for_gearbox()) });

    let color = get_match_string(matches, quiet, "color", "Color: ", "", true);

    validate(&brand, &model, &color, make_year, gearbox)?;

    let photo_url = matches.get_one::<String>("photo").cloned().unwrap_or_else(|| {
        resolve_photo(&supported, &brand, &model)
    });

    let mut car = Car::new(
        None,
        user_id,
        brand,
        model,
        gearbox.expect("Validated above"),
        color,
        make_year,
        Local::now().date_naive(),
        photo_url,
    );
    car.set_id(generate_id());

    warn!("Trying to save car post");
    match api_client.add_car(&car) {
        Ok(car) => {
            warn!(
                "{} Car {} {} ({}) posted!",
                "\u{2714}".bright_green(),
                car.brand().green(),
                car.model().green(),
                car.id().expect("Id should not be empty")
            );
            Ok(0)
        }
        Err(error) => Err(format!("Could not save car post: {error}"))?,
    }
}

fn validate(brand: &str, model: &str, color: &str, make_year: i32, gearbox: Option<Gearbox>) -> Result<(), AppError> {
    if brand.is_empty() || model.is_empty() || color.is_empty() || make_year == 0 || gearbox.is_none() {
        return Err(AppError("Please fill out all fields".to_owned()));
    }

    Ok(())
}

fn resolve_photo(supported: &[SupportedCar], brand: &str, model: &str) -> String {
    supported
        .iter()
        .find(|s| s.brand() == brand)
        .map(|s| s.photo_for(Some(model)).to_owned())
        .unwrap_or_default()
}

fn generate_id() -> String {
    let mut rng = rand::thread_rng();

    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

fn ask_for_year() -> i32 {
    Select::new("Select the manufacture year:", year_options())
        .with_page_size(10)
        .prompt()
        .unwrap_or_else(|_| {
            process::exit(1);
        })
}

fn ask_for_gearbox() -> Gearbox {
    Select::new("Select the gearbox type:", vec![Gearbox::Automatic, Gearbox::Manual])
        .prompt()
        .unwrap_or_else(|_| {
            process::exit(1);
        })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::api::car::Gearbox;
    use crate::new::{generate_id, validate, ID_ALPHABET, ID_LENGTH};

    #[test]
    fn test_generate_id() {
        let id = generate_id();

        assert_eq!(ID_LENGTH, id.len());
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_id_varies() {
        let ids: Vec<String> = (0..16).map(|_| generate_id()).collect();

        assert!(ids.iter().any(|id| id != &ids[0]));
    }

    #[test_case("", "Corolla", "Blue", 2020, Some(Gearbox::Automatic); "missing brand")]
    #[test_case("Toyota", "", "Blue", 2020, Some(Gearbox::Automatic); "missing model")]
    #[test_case("Toyota", "Corolla", "", 2020, Some(Gearbox::Automatic); "missing color")]
    #[test_case("Toyota", "Corolla", "Blue", 0, Some(Gearbox::Automatic); "missing year")]
    #[test_case("Toyota", "Corolla", "Blue", 2020, None; "missing gearbox")]
    fn test_validate_rejects_missing_fields(
        brand: &str,
        model: &str,
        color: &str,
        year: i32,
        gearbox: Option<Gearbox>,
    ) {
        assert!(validate(brand, model, color, year, gearbox).is_err());
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert!(validate("Toyota", "Corolla", "Blue", 2020, Some(Gearbox::Manual)).is_ok());
    }
}
