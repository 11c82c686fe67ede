use std::sync::Arc;

use crate::application::services::EntryService;
use crate::domain::repositories::EntryRepository;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub entry_service: Arc<EntryService<dyn EntryRepository>>,
    /// Entries per page when the client does not ask for a size.
    pub page_size: u32,
}

impl AppState {
    pub fn new(entry_service: Arc<EntryService<dyn EntryRepository>>, page_size: u32) -> Self {
        Self {
            entry_service,
            page_size,
        }
    }
}
