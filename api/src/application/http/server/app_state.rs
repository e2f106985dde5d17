use std::sync::Arc;

use allergen_guard_core::application::AllergenGuardService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: AllergenGuardService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: AllergenGuardService) -> Self {
        Self { args, service }
    }
}
