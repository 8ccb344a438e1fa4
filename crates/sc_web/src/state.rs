use std::sync::Arc;
use sc_scrapers::ScrapManager;

pub struct AppState {
    pub manager: Arc<ScrapManager>,
}

impl AppState {
    pub fn new(manager: Arc<ScrapManager>) -> Self {
        Self { manager }
    }
}
