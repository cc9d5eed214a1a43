pub mod avatar;
pub mod backend;
pub mod i18n;
pub mod security;
