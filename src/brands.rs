use std::collections::HashMap;
use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use log::warn;
use term_table::row::Row;
use term_table::table_cell::TableCell;
use term_table::{Table, TableStyle};

use crate::api::supported::SupportedCar;
use crate::api::Client;
use crate::TERMINAL_SIZE;

pub const COMMAND_NAME: &str = "brands";

pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .short_flag('b')
        .about("List the supported car brands and models")
}

pub fn command(_matches: &ArgMatches, api_client: &dyn Client) -> Result<u8, Box<dyn Error>> {
    let supported = api_client.get_supported_cars()?;

    if supported.is_empty() {
        warn!("{} No supported brands found", "\u{2716}".bright_red());
        return Ok(1);
    }

    warn!("{}", print_table_for_brands(&supported));

    Ok(0)
}

fn print_table_for_brands(supported: &[SupportedCar]) -> String {
    let mut table = Table::new();
    let terminal_width = TERMINAL_SIZE.try_lock().expect("Failed").0;

    table.max_column_widths = HashMap::from([(0, terminal_width * 25 / 100), (1, terminal_width * 70 / 100)]);
    table.style = TableStyle::rounded();

    table.add_row(Row::new(vec![
        TableCell::new("Brand".green()),
        TableCell::new("Models".green()),
    ]));

    for brand in supported {
        table.add_row(Row::new(vec![
            TableCell::new(brand.brand()),
            TableCell::new(brand.model_names().join(", ")),
        ]));
    }

    table.render()
}
