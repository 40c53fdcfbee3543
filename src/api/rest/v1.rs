use log::debug;
use reqwest::StatusCode;

use crate::api;
use crate::api::car::Car;
use crate::api::entity::Entity;
use crate::api::rest::{get_builder, get_response, parse_json};
use crate::api::supported::SupportedCar;
use crate::config::Config;

// The service speaks plain resource-per-path REST in the json-server style:
// /cars for listings and /supportedCarBrandsAndModels for reference data.
pub struct Rest {
    client: reqwest::blocking::Client,
    config: Config,
}

impl Rest {
    const CARS: &'static str = "cars";
    const SUPPORTED: &'static str = "supportedCarBrandsAndModels";

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, api::Error> {
        let url = self.url(path);
        debug!("Sending GET request to {url}\n");

        parse_json(get_response(self.client.get(url))?)
    }
}

impl From<Config> for Rest {
    fn from(value: Config) -> Self {
        Self {
            client: get_builder(&value).build().expect("Got client"),
            config: value,
        }
    }
}

impl api::Client for Rest {
    fn get_cars(&self) -> Result<Vec<Car>, api::Error> {
        self.fetch(Self::CARS)
    }

    fn view_car(&self, id: &str) -> Result<Car, api::Error> {
        self.fetch(&format!("{}/{id}", Self::CARS))
    }

    fn add_car(&self, car: &Car) -> Result<Car, api::Error> {
        let url = self.url(Self::CARS);
        debug!("Sending POST request to {url}:\n{car:#?}\n");

        parse_json(get_response(self.client.post(url).json(car))?)
    }

    fn update_car(&self, car: &Car) -> Result<Car, api::Error> {
        let Some(id) = car.id() else {
            return Err(api::Error("Cannot update a car post without an id".to_string()));
        };

        let url = self.url(&format!("{}/{id}", Self::CARS));
        debug!("Sending PUT request to {url}:\n{car:#?}\n");

        parse_json(get_response(self.client.put(url).json(car))?)
    }

    fn delete_car(&self, id: &str) -> Result<bool, api::Error> {
        let url = self.url(&format!("{}/{id}", Self::CARS));
        debug!("Sending DELETE request to {url}\n");

        match self.client.delete(url).send() {
            Ok(response) => {
                if response.status() == StatusCode::NOT_FOUND {
                    Ok(false)
                } else if response.status().is_success() {
                    Ok(true)
                } else {
                    Err(api::Error(format!("Server responded with code {}", response.status())))
                }
            }
            Err(e) => Err(api::Error(e.to_string())),
        }
    }

    fn get_supported_cars(&self) -> Result<Vec<SupportedCar>, api::Error> {
        self.fetch(Self::SUPPORTED)
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use test_case::test_case;

    use crate::api::car::{Car, Gearbox};
    use crate::api::entity::Entity;
    use crate::api::rest::tests::create_server_response;
    use crate::api::rest::v1::Rest;
    use crate::api::Client;
    use crate::config::Config;

    #[test_case(200)]
    #[test_case(201)]
    #[test_case(202)]
    fn test_ok_server_without_json(status: usize) {
        let test = create_server_response(None::<String>, status, "GET", "/cars");
        let error = test.1.get_cars().expect_err("Empty body should not parse");

        assert_eq!("Server response did not contain JSON", error.to_string());
    }

    #[test_case(400)]
    #[test_case(403)]
    #[test_case(404)]
    #[test_case(500)]
    fn test_bad_server(status: usize) {
        let test = create_server_response(None::<String>, status, "GET", "/cars");
        let error = test.1.get_cars().expect_err("Status should fail");

        assert!(error.to_string().starts_with("Server responded with code"));
    }

    #[test]
    fn test_get_cars_empty() {
        let test = create_server_response(
            Option::from("tests/responses/cars_list_empty.json"),
            200,
            "GET",
            "/cars",
        );

        let cars = test.1.get_cars().expect("Request should not have failed");
        assert_eq!(0, cars.len());

        test.0.assert();
    }

    #[test]
    fn test_get_cars_list() {
        let test = create_server_response(Option::from("tests/responses/cars_list.json"), 200, "GET", "/cars");

        let cars = test.1.get_cars().expect("Request should not have failed");
        assert_eq!(5, cars.len());
        assert_eq!("Toyota", cars[0].brand());
        assert_eq!(Gearbox::Manual, cars[1].gearbox());

        test.0.assert();
    }

    #[test]
    fn test_view_car() {
        let test = create_server_response(
            Option::from("tests/responses/car_view.json"),
            200,
            "GET",
            "/cars/abc123",
        );

        let car = test.1.view_car("abc123").expect("Request should not have failed");
        assert_eq!(Some("abc123"), car.id());
        assert_eq!("Corolla", car.model());

        test.0.assert();
    }

    #[test]
    fn test_add_car() {
        let test = create_server_response(
            Option::from("tests/responses/car_created.json"),
            201,
            "POST",
            "/cars",
        );

        let car = Car::new(
            Some("xk29ab".to_owned()),
            "user-1".to_owned(),
            "Honda".to_owned(),
            "Civic".to_owned(),
            Gearbox::Manual,
            "Black".to_owned(),
            2021,
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("Valid date"),
            String::new(),
        );

        let saved = test.1.add_car(&car).expect("Request should not have failed");
        assert_eq!(Some("xk29ab"), saved.id());

        test.0.assert();
    }

    #[test]
    fn test_update_car_without_id() {
        let test = create_server_response(None::<String>, 200, "PUT", "/cars/none");
        let error = test
            .1
            .update_car(&Car::default())
            .expect_err("Update without id should fail");

        assert_eq!("Cannot update a car post without an id", error.to_string());
    }

    #[test]
    fn test_delete_car() {
        let test = create_server_response(None::<String>, 200, "DELETE", "/cars/abc123");

        assert!(test.1.delete_car("abc123").expect("Request should not have failed"));

        test.0.assert();
    }

    #[test]
    fn test_delete_car_not_found() {
        let test = create_server_response(None::<String>, 404, "DELETE", "/cars/abc123");

        assert!(!test.1.delete_car("abc123").expect("Missing posts are not an error"));

        test.0.assert();
    }

    #[test]
    fn test_get_supported_cars() {
        let test = create_server_response(
            Option::from("tests/responses/supported_cars.json"),
            200,
            "GET",
            "/supportedCarBrandsAndModels",
        );

        let supported = test.1.get_supported_cars().expect("Request should not have failed");
        assert_eq!(2, supported.len());
        assert_eq!("Toyota", supported[0].brand());

        test.0.assert();
    }

    #[test]
    fn test_invalid_server_address() {
        let client = Rest::from(Config {
            host: "http://localhost:1".to_owned(),
            user_id: "user-1".to_owned(),
            verify_host: false,
            api_version: Option::from("RestV1".to_owned()),
        });

        assert!(client.get_cars().is_err());
    }
}
