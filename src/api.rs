use std::fmt;
use std::str::FromStr;

use colored::Colorize;

use crate::api::car::Car;
use crate::api::supported::SupportedCar;
use crate::api::Api::RestV1;
use crate::config::Config;

pub mod car;
pub mod entity;
mod rest;
pub mod supported;

pub trait Client {
    fn get_cars(&self) -> Result<Vec<Car>, Error>;
    fn view_car(&self, id: &str) -> Result<Car, Error>;
    fn add_car(&self, car: &Car) -> Result<Car, Error>;
    fn update_car(&self, car: &Car) -> Result<Car, Error>;
    fn delete_car(&self, id: &str) -> Result<bool, Error>;
    fn get_supported_cars(&self) -> Result<Vec<SupportedCar>, Error>;
    fn get_config(&self) -> &Config;
}

#[derive(Debug)]
pub struct Error(String);

#[derive(Debug)]
pub struct AppError(pub String);

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} Error: {}", "\u{2716}".bright_red(), self.0)
    }
}

impl From<Error> for AppError {
    fn from(value: Error) -> Self {
        Self(value.0)
    }
}

#[derive(Debug)]
pub enum Api {
    RestV1,
}

impl Api {
    pub fn get(&self, config: Config) -> Box<dyn Client> {
        match self {
            RestV1 => Box::new(rest::v1::Rest::from(config)),
        }
    }
}

impl FromStr for Api {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "RestV1" | "" => Ok(RestV1),
            _ => Err(()),
        }
    }
}
