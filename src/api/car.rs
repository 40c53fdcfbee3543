use std::cmp;
use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;

use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::api::entity::Entity;
use crate::TERMINAL_SIZE;

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Gearbox {
    #[default]
    Automatic,
    Manual,
}

impl Display for Gearbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Automatic => write!(f, "Automatic"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

impl FromStr for Gearbox {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("Unknown gearbox type: {input}")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    user_id: String,
    brand: String,
    model: String,
    gearbox: Gearbox,
    color: String,
    make_year: i32,
    date_posted: NaiveDate,
    #[serde(default)]
    photo_url: String,
}

impl Car {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: Option<String>,
        user_id: String,
        brand: String,
        model: String,
        gearbox: Gearbox,
        color: String,
        make_year: i32,
        date_posted: NaiveDate,
        photo_url: String,
    ) -> Self {
        Self {
            id,
            user_id,
            brand,
            model,
            gearbox,
            color,
            make_year,
            date_posted,
            photo_url,
        }
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }
    pub fn brand(&self) -> &str {
        self.brand.as_str()
    }
    pub fn model(&self) -> &str {
        self.model.as_str()
    }
    pub const fn gearbox(&self) -> Gearbox {
        self.gearbox
    }
    pub fn color(&self) -> &str {
        self.color.as_str()
    }
    pub const fn make_year(&self) -> i32 {
        self.make_year
    }
    pub const fn date_posted(&self) -> NaiveDate {
        self.date_posted
    }
    pub fn photo_url(&self) -> &str {
        self.photo_url.as_str()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.user_id == user_id
    }
}

impl Display for Car {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let row = format!(
            "{}. {} {} {} ({})",
            self.id.as_deref().unwrap_or("-"),
            self.make_year,
            self.brand(),
            self.model(),
            self.color()
        );

        let line = truncate(&row, TERMINAL_SIZE.lock().expect("Failed to get terminal size").0 - 5);

        write!(f, "{line}")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let max_chars = cmp::max(max_chars, 40);
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...{}", &s[..idx], "".white()),
    }
}

impl Entity for Car {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
