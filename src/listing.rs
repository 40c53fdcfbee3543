use std::str::FromStr;

use chrono::{Datelike, Local};

use crate::api::car::{Car, Gearbox};

/// How many years back the year options reach, current year included.
pub const YEAR_OPTION_SPAN: i32 = 20;

/// Attribute and ownership filters applied to the fetched car posts.
/// Unset fields match everything.
#[derive(Default, Clone)]
pub struct CarFilters {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub gearbox: Option<Gearbox>,
    pub color: Option<String>,
    pub owner: Option<String>,
}

impl CarFilters {
    pub const fn is_active(&self) -> bool {
        self.brand.is_some()
            || self.model.is_some()
            || self.year_from.is_some()
            || self.year_to.is_some()
            || self.gearbox.is_some()
            || self.color.is_some()
            || self.owner.is_some()
    }

    pub fn matches(&self, car: &Car) -> bool {
        if self.owner.as_deref().is_some_and(|owner| car.user_id() != owner) {
            return false;
        }
        if self.brand.as_deref().is_some_and(|brand| car.brand() != brand) {
            return false;
        }
        if self.model.as_deref().is_some_and(|model| car.model() != model) {
            return false;
        }
        if self.year_from.is_some_and(|from| car.make_year() < from) {
            return false;
        }
        if self.year_to.is_some_and(|to| car.make_year() > to) {
            return false;
        }
        if self.gearbox.is_some_and(|gearbox| car.gearbox() != gearbox) {
            return false;
        }
        if self.color.as_deref().is_some_and(|color| car.color() != color) {
            return false;
        }

        true
    }

    pub fn apply(&self, cars: Vec<Car>) -> Vec<Car> {
        cars.into_iter().filter(|car| self.matches(car)).collect()
    }

    /// Drops a selected model that the current options no longer offer,
    /// which happens when the brand selection changes. Returns the
    /// discarded model.
    pub fn discard_stale_model(&mut self, options: &FilterOptions) -> Option<String> {
        match self.model.as_deref() {
            Some(model) if !options.models.iter().any(|m| m == model) => self.model.take(),
            _ => None,
        }
    }
}

/// Option sets derived from the unfiltered data, distinct values in
/// first-seen order. Model options are scoped to the selected brand.
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub models: Vec<String>,
    pub gearboxes: Vec<Gearbox>,
    pub colors: Vec<String>,
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn from_cars(cars: &[Car], brand: Option<&str>) -> Self {
        Self {
            brands: distinct(cars.iter().map(|car| car.brand().to_owned())),
            models: distinct(
                cars.iter()
                    .filter(|car| brand.map_or(true, |brand| car.brand() == brand))
                    .map(|car| car.model().to_owned()),
            ),
            gearboxes: distinct(cars.iter().map(Car::gearbox)),
            colors: distinct(cars.iter().map(|car| car.color().to_owned())),
            years: year_options(),
        }
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }

    out
}

/// Current year and the nineteen before it, newest first.
pub fn year_options() -> Vec<i32> {
    let current = Local::now().year();
    (0..YEAR_OPTION_SPAN).map(|i| current - i).collect()
}

fn search_text(car: &Car) -> String {
    format!(
        "{} {} {} {} {}",
        car.brand(),
        car.model(),
        car.gearbox(),
        car.make_year(),
        car.color()
    )
    .to_lowercase()
}

/// Every whitespace-separated term has to appear somewhere in the record.
pub fn matches_search(car: &Car, query: &str) -> bool {
    let text = search_text(car);
    query.to_lowercase().split_whitespace().all(|term| text.contains(term))
}

pub fn search(cars: Vec<Car>, query: &str) -> Vec<Car> {
    if query.trim().is_empty() {
        return cars;
    }

    cars.into_iter().filter(|car| matches_search(car, query)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DatePosted,
    MakeYear,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "posted" | "date" | "dateposted" => Ok(Self::DatePosted),
            "year" | "makeyear" => Ok(Self::MakeYear),
            _ => Err(format!("Unknown sort key: {input} (expected 'posted' or 'year')")),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Stable single-key sort. No key keeps the fetched order.
pub fn sort(cars: &mut [Car], key: Option<SortKey>, direction: SortDirection) {
    let Some(key) = key else {
        return;
    };

    cars.sort_by(|a, b| {
        let ordering = match key {
            SortKey::DatePosted => a.date_posted().cmp(&b.date_posted()),
            SortKey::MakeYear => a.make_year().cmp(&b.make_year()),
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
