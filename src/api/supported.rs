use std::fmt::{Display, Formatter};

use inquire::Select;
use serde::Deserialize;

use crate::filter::filter;
use crate::prompt::ask_prompt;

#[derive(Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SupportedModel {
    name: String,
    #[serde(default)]
    image: String,
}

impl SupportedModel {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Reference data used to populate brand and model options when posting
/// a new car. Not a listing entity, it has no id of its own.
#[derive(Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SupportedCar {
    brand: String,
    #[serde(default)]
    brand_image: String,
    models: Vec<SupportedModel>,
}

impl SupportedCar {
    pub fn brand(&self) -> &str {
        self.brand.as_str()
    }
    pub fn models(&self) -> &[SupportedModel] {
        &self.models
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(SupportedModel::name).collect()
    }

    /// Photo used for a new listing. The model image wins when the model is
    /// known and has one, the brand image covers everything else.
    pub fn photo_for(&self, model: Option<&str>) -> &str {
        model
            .and_then(|name| self.models.iter().find(|m| m.name == name))
            .map_or(self.brand_image.as_str(), |m| {
                if m.image.is_empty() {
                    self.brand_image.as_str()
                } else {
                    m.image.as_str()
                }
            })
    }
}

impl Display for SupportedCar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} models)", self.brand(), self.models.len())
    }
}

pub fn ask_for_brand(supported: &[SupportedCar]) -> String {
    if supported.is_empty() {
        return ask_prompt("Brand:", true, "");
    }

    let count = supported.len();

    Select::new("Select a brand (ESC for free text):", supported.to_vec())
        .with_help_message(format!("Number of supported brands: {count}").as_str())
        .with_page_size(10)
        .with_scorer(&filter)
        .with_formatter(&|i| i.value.brand().to_string())
        .prompt()
        .map_or_else(|_| ask_prompt("Brand:", true, ""), |choice| choice.brand)
}

pub fn ask_for_model(supported: &[SupportedCar], brand: &str) -> String {
    let models: Vec<String> = supported
        .iter()
        .find(|s| s.brand == brand)
        .map(|s| s.models.iter().map(|m| m.name.clone()).collect())
        .unwrap_or_default();

    if models.is_empty() {
        return ask_prompt("Model:", true, "");
    }

    let count = models.len();

    Select::new("Select a model (ESC for free text):", models)
        .with_help_message(format!("Number of models for {brand}: {count}").as_str())
        .with_page_size(10)
        .with_scorer(&filter)
        .prompt()
        .map_or_else(|_| ask_prompt("Model:", true, ""), |choice| choice)
}
