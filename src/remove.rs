use std::error::Error;

use clap::{arg, Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use inquire::{Confirm, Select};
use log::warn;

use crate::api::car::Car;
use crate::api::entity::Entity;
use crate::api::{AppError, Client};
use crate::filter::filter;

pub const COMMAND_NAME: &str = "remove";

pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .visible_alias("delete")
        .short_flag('r')
        .about("Remove one of your own car posts")
        .arg(arg!(-i --id <ID> "Car post id"))
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .action(ArgAction::SetTrue)
                .help("Do not ask for confirmation"),
        )
}

pub fn command(matches: &ArgMatches, api_client: &dyn Client, quiet: bool) -> Result<u8, Box<dyn Error>> {
    let user_id = api_client.get_config().user_id.clone();
    if user_id.is_empty() {
        Err(AppError("No userId configured, set it in the config file".to_owned()))?;
    }

    let id = match matches.get_one::<String>("id") {
        Some(id) => id.clone(),
        None => {
            if quiet {
                Err(AppError("Invalid id given".to_owned()))?
            }

            select_own_car(api_client, &user_id)?
        }
    };

    let car = api_client.view_car(&id)?;
    if !car.is_owned_by(&user_id) {
        Err(AppError("Only the owner can remove a car post".to_owned()))?;
    }

    if !matches.get_flag("yes") && !quiet && !confirm_removal(&car) {
        warn!("Cancelled");
        return Ok(1);
    }

    match api_client.delete_car(&id) {
        Ok(status) => {
            if status {
                warn!("{} Car post removed", "\u{2714}".bright_green());
            } else {
                warn!("{} Failed to remove car post", "\u{2716}".bright_red());
            }
        }
        Err(error) => {
            Err(error)?;
        }
    }

    Ok(0)
}

fn select_own_car(api_client: &dyn Client, user_id: &str) -> Result<String, AppError> {
    let own: Vec<Car> = api_client
        .get_cars()?
        .into_iter()
        .filter(|car| car.is_owned_by(user_id))
        .collect();

    if own.is_empty() {
        return Err(AppError("You have no car posts".to_owned()));
    }

    let count = own.len();
    let answer = Select::new("Select the car post to remove:", own)
        .with_help_message(format!("Number of your car posts: {count}").as_str())
        .with_page_size(10)
        .with_scorer(&filter)
        .prompt();

    match answer {
        Ok(choice) => Ok(choice.id().expect("Id should be set").to_owned()),
        Err(err) => Err(AppError(err.to_string())),
    }
}

fn confirm_removal(car: &Car) -> bool {
    Confirm::new(format!("Remove {} {} ({})?", car.brand(), car.model(), car.id().unwrap_or("-")).as_str())
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}
