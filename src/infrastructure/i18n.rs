// src/infrastructure/i18n.rs
use crate::application::ports::i18n::{DEFAULT_LOCALE, LanguageCatalog};
use std::collections::HashMap;

type Table = HashMap<&'static str, &'static str>;

/// Language tables compiled into the binary.
pub struct StaticLanguageCatalog {
    tables: HashMap<&'static str, Table>,
}

const EN: &[(&str, &str)] = &[
    ("people.title", "People"),
    ("error.title", "Something went wrong"),
    ("error.text", "We could not complete your request. Please try again later."),
];

const DE: &[(&str, &str)] = &[
    ("people.title", "Personen"),
    ("error.title", "Etwas ist schiefgelaufen"),
    ("error.text", "Ihre Anfrage konnte nicht bearbeitet werden. Bitte versuchen Sie es später erneut."),
];

const FR: &[(&str, &str)] = &[
    ("people.title", "Membres"),
    ("error.title", "Une erreur est survenue"),
    ("error.text", "Votre demande n'a pas pu aboutir. Veuillez réessayer plus tard."),
];

impl StaticLanguageCatalog {
    pub fn new() -> Self {
        let tables = [("en", EN), ("de", DE), ("fr", FR)]
            .into_iter()
            .map(|(locale, entries)| (locale, entries.iter().copied().collect::<Table>()))
            .collect();
        Self { tables }
    }
}

impl Default for StaticLanguageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageCatalog for StaticLanguageCatalog {
    fn get(&self, locale: &str, key: &str) -> String {
        self.tables
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| self.tables.get(DEFAULT_LOCALE).and_then(|table| table.get(key)))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    fn supports(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }
}
