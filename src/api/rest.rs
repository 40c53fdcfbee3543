use log::debug;
use reqwest::blocking::{ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api;
use crate::config::Config;

pub mod v1;

fn get_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new().danger_accept_invalid_certs(!config.verify_host)
}

fn get_response(request: RequestBuilder) -> Result<Response, api::Error> {
    match request.send() {
        Ok(r) => {
            if r.status().is_success() {
                Ok(r)
            } else {
                Err(api::Error(format!("Server responded with code {}", r.status())))
            }
        }
        Err(e) => Err(api::Error(e.to_string())),
    }
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, api::Error> {
    let json: Value = match response.json() {
        Ok(value) => value,
        Err(_) => return Err(api::Error("Server response did not contain JSON".to_string())),
    };

    debug!("Received response:\n{:#?}\n", json);

    match serde_json::from_value::<T>(json) {
        Ok(result) => Ok(result),
        Err(error) => Err(api::Error(error.to_string())),
    }
}
