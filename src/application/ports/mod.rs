pub mod avatar;
pub mod i18n;
pub mod security;
