pub const DEFAULT_LOCALE: &str = "en";

pub trait LanguageCatalog: Send + Sync {
    /// Localised text for `key`, falling back to the default locale and
    /// finally to the key itself.
    fn get(&self, locale: &str, key: &str) -> String;

    fn supports(&self, locale: &str) -> bool;
}
