// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use crate::config::{AvatarSettings, SiteSettings};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub site: Arc<SiteSettings>,
    pub avatar: Arc<AvatarSettings>,
    /// CORS origins; empty or `*` allows any origin.
    pub allowed_origins: Arc<Vec<String>>,
}
