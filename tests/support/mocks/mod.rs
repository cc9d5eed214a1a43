// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod avatar;
pub mod repos;
pub mod security;
pub mod time;

pub use avatar::{StubAvatarFetcher, PNG_BYTES};
pub use repos::{FailingProfileRepo, InMemoryProfileRepo, InMemorySpaceRepo};
pub use security::{ADMIN_TOKEN, DummyTokenManager, MOD_TOKEN, USER_TOKEN, admin_user, plain_user};
pub use time::fixed_now;
