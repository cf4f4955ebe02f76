use axum::extract::FromRef;
use std::sync::Arc;

use crate::controller::FormController;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<FormController>,
}

impl FromRef<AppState> for Arc<FormController> {
    fn from_ref(state: &AppState) -> Self {
        state.controller.clone()
    }
}
