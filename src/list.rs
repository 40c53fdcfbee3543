use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;

use clap::{arg, Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use log::{info, warn};
use term_table::row::Row;
use term_table::table_cell::{Alignment, TableCell};
use term_table::{Table, TableStyle};

use crate::api::car::{Car, Gearbox};
use crate::api::entity::Entity;
use crate::api::{AppError, Client};
use crate::listing::{search, sort, CarFilters, FilterOptions, SortDirection, SortKey};
use crate::TERMINAL_SIZE;

pub const COMMAND_NAME: &str = "list";

#[allow(clippy::cognitive_complexity)]
pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .about("List car posts")
        .short_flag('l')
        .visible_aliases(["ls"])
        .arg(arg!([query] "Free text search over brand, model, gearbox, year and color"))
        .arg(arg!(-b --brand <BRAND> "Only show the given brand"))
        .arg(arg!(-m --model <MODEL> "Only show the given model"))
        .arg(
            arg!(--"year-from" <YEAR> "Oldest manufacture year to show")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            arg!(--"year-to" <YEAR> "Newest manufacture year to show")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(arg!(-g --gearbox <GEARBOX> "Only show the given gearbox type (Automatic or Manual)"))
        .arg(arg!(--color <COLOR> "Only show the given color"))
        .arg(
            Arg::new("mine")
                .long("mine")
                .action(ArgAction::SetTrue)
                .help("Only show your own posts"),
        )
        .arg(arg!(-s --"sort-by" <KEY> "Sort by 'posted' or 'year'"))
        .arg(
            Arg::new("asc")
                .long("asc")
                .action(ArgAction::SetTrue)
                .help("Sort ascending instead of descending"),
        )
        .arg(arg!(-i --id <ID> "Show a single car post"))
}

fn build_filters(matches: &ArgMatches, user_id: &str) -> Result<CarFilters, AppError> {
    let gearbox = matches
        .get_one::<String>("gearbox")
        .map(|value| Gearbox::from_str(value))
        .transpose()
        .map_err(AppError)?;

    let owner = if matches.get_flag("mine") {
        if user_id.is_empty() {
            return Err(AppError("No userId configured, set it in the config file".to_owned()));
        }
        Some(user_id.to_owned())
    } else {
        None
    };

    Ok(CarFilters {
        brand: matches.get_one::<String>("brand").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        year_from: matches.get_one::<i32>("year-from").copied(),
        year_to: matches.get_one::<i32>("year-to").copied(),
        gearbox,
        color: matches.get_one::<String>("color").cloned(),
        owner,
    })
}

pub fn command(matches: &ArgMatches, api_client: &dyn Client) -> Result<u8, Box<dyn Error>> {
    let user_id = api_client.get_config().user_id.clone();

    if let Some(id) = matches.get_one::<String>("id") {
        let car = api_client.view_car(id)?;
        warn!("{}", print_table_for_car(&car, &user_id));
        return Ok(0);
    }

    let mut filters = build_filters(matches, &user_id)?;
    let query = matches.get_one::<String>("query").map_or("", String::as_str);
    let sort_key = matches
        .get_one::<String>("sort-by")
        .map(|value| SortKey::from_str(value))
        .transpose()
        .map_err(AppError)?;
    let direction = if matches.get_flag("asc") {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };

    let cars = api_client.get_cars()?;
    let options = FilterOptions::from_cars(&cars, filters.brand.as_deref());
    if let Some(model) = filters.discard_stale_model(&options) {
        info!("Model {} is not available for the selected brand, ignoring it", model.yellow());
    }

    let mut result = search(filters.apply(cars), query);
    sort(&mut result, sort_key, direction);

    if result.is_empty() {
        if filters.is_active() || !query.is_empty() {
            warn!("{} No car posts matched the active filters", "\u{2716}".bright_red());
        } else {
            warn!("{} No car posts found", "\u{2716}".bright_red());
        }
        return Ok(1);
    }

    warn!("{}", print_table_for_cars(&result, &user_id));

    Ok(0)
}

fn print_table_for_cars(cars: &[Car], user_id: &str) -> String {
    let mut table = Table::new();
    let terminal_width = TERMINAL_SIZE.try_lock().expect("Failed").0;

    table.max_column_widths = HashMap::from([
        (0, terminal_width * 14 / 100),
        (1, terminal_width * 18 / 100),
        (2, terminal_width * 18 / 100),
        (5, terminal_width * 16 / 100),
    ]);
    table.style = TableStyle::rounded();

    table.add_row(Row::new(vec![
        TableCell::new("Id".green()),
        TableCell::new("Brand".green()),
        TableCell::new("Model".green()),
        TableCell::new("Year".green()),
        TableCell::new("Gearbox".green()),
        TableCell::new("Color".green()),
        TableCell::new("Posted".green()),
    ]));

    for car in cars {
        let id = car.id().unwrap_or("-");
        table.add_row(Row::new(vec![
            TableCell::new(if car.is_owned_by(user_id) {
                format!("{id} {}", "*".yellow())
            } else {
                id.to_string()
            }),
            TableCell::new(car.brand()),
            TableCell::new(car.model()),
            TableCell::new(car.make_year()),
            TableCell::new(car.gearbox()),
            TableCell::new(car.color()),
            TableCell::new(car.date_posted()),
        ]));
    }

    table.render()
}

fn print_table_for_car(car: &Car, user_id: &str) -> String {
    let mut table = Table::new();
    let terminal_width = TERMINAL_SIZE.try_lock().expect("Failed").0;

    table.max_column_widths = HashMap::from([(0, terminal_width * 20 / 100), (1, terminal_width * 75 / 100)]);
    table.style = TableStyle::rounded();

    table.add_row(Row::new(vec![TableCell::builder(
        format!("{} {} {}", car.make_year(), car.brand(), car.model()).green(),
    )
    .alignment(Alignment::Center)
    .col_span(2)
    .build()]));

    let owner = if car.is_owned_by(user_id) {
        format!("{} {}", car.user_id(), "(you)".yellow())
    } else {
        car.user_id().to_string()
    };

    table.add_row(Row::new(vec![
        TableCell::new("Id".green()),
        TableCell::new(car.id().unwrap_or("-")),
    ]));
    table.add_row(Row::new(vec![TableCell::new("Owner".green()), TableCell::new(owner)]));
    table.add_row(Row::new(vec![
        TableCell::new("Gearbox".green()),
        TableCell::new(car.gearbox()),
    ]));
    table.add_row(Row::new(vec![
        TableCell::new("Color".green()),
        TableCell::new(car.color()),
    ]));
    table.add_row(Row::new(vec![
        TableCell::new("Posted".green()),
        TableCell::new(car.date_posted()),
    ]));
    table.add_row(Row::new(vec![
        TableCell::new("Photo".green()),
        TableCell::new(car.photo_url()),
    ]));

    table.render()
}
