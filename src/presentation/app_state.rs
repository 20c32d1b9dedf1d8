// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DashboardController>,
}
