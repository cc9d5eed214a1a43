pub mod errors;
pub mod pager;
pub mod profile;
pub mod space;
