#![allow(dead_code)]

use axum_test::TestServer;
use mumblr::application::services::EntryService;
use mumblr::domain::entities::Entry;
use mumblr::domain::kinds::EntryTypeRegistry;
use mumblr::domain::repositories::EntryRepository;
use mumblr::infrastructure::persistence::MemoryEntryRepository;
use mumblr::routes::router;
use mumblr::state::AppState;
use mumblr::utils::url_resolver::UrlResolver;
use std::sync::Arc;

pub const PAGE_SIZE: u32 = 10;

pub fn create_test_state() -> (AppState, Arc<MemoryEntryRepository>) {
    let repo = Arc::new(MemoryEntryRepository::new());
    let repository: Arc<dyn EntryRepository> = repo.clone();

    let entry_service = Arc::new(EntryService::new(
        repository,
        Arc::new(EntryTypeRegistry::with_builtin_kinds()),
        Arc::new(UrlResolver::default()),
    ));

    (AppState::new(entry_service, PAGE_SIZE), repo)
}

/// Application routes with tracing; paths are used without trailing slash.
pub fn create_test_server() -> (TestServer, Arc<MemoryEntryRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, repo)
}

pub fn text_entry(title: &str, slug: &str, content: &str) -> Entry {
    let mut entry = Entry::new("text", title, slug);
    entry
        .fields
        .insert("content".to_string(), content.to_string());
    entry
}

pub async fn insert_entry(repo: &MemoryEntryRepository, entry: Entry) -> Entry {
    repo.insert(entry).await.unwrap()
}
