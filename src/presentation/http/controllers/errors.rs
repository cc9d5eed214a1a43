use crate::presentation::http::{state::HttpState, views::View};
use rand::Rng;
use serde::Serialize;

pub const ERROR_TEMPLATE: &str = "error";

#[derive(Debug, Serialize)]
pub struct ErrorPageModel {
    pub title: String,
    pub text: String,
    #[serde(rename = "APPNAME")]
    pub app_name: String,
    #[serde(rename = "currentLocale")]
    pub current_locale: String,
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
    #[serde(rename = "KEYWORDS")]
    pub keywords: String,
    /// Decorative value for the page artwork.
    pub rand: u32,
}

pub fn error_page(state: &HttpState, locale: &str) -> View<ErrorPageModel> {
    let catalog = state.services.language_catalog();
    View::new(
        ERROR_TEMPLATE,
        ErrorPageModel {
            title: catalog.get(locale, "error.title"),
            text: catalog.get(locale, "error.text"),
            app_name: state.site.app_name.clone(),
            current_locale: locale.to_string(),
            description: state.site.description.clone(),
            keywords: state.site.keywords.clone(),
            rand: rand::rng().random_range(100..1437),
        },
    )
}
