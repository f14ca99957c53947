use std::sync::Arc;

use med_core::Clock;
use med_core::model::Quiz;
use med_core::model::content::Module;
use storage::repository::Storage;

use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::progress::QuizProgressStore;

/// Assembles app-facing services over a storage backend and the bundled
/// content catalog.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        modules: Vec<Module>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, clock, modules))
    }

    /// Build services over an already-constructed storage backend.
    #[must_use]
    pub fn with_storage(storage: Storage, clock: Clock, modules: Vec<Module>) -> Self {
        Self {
            clock,
            storage,
            catalog: Arc::new(CatalogService::new(modules)),
        }
    }

    /// Build services over volatile in-memory storage, for tests and
    /// prototyping.
    #[must_use]
    pub fn in_memory(clock: Clock, modules: Vec<Module>) -> Self {
        Self::with_storage(Storage::in_memory(), clock, modules)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Opens a progress store for one attempt at the given quiz. Call
    /// `load` on the returned store to resume any persisted progress.
    #[must_use]
    pub fn open_quiz(&self, quiz: &Quiz) -> QuizProgressStore {
        QuizProgressStore::new(
            quiz.id.clone(),
            quiz.definition.clone(),
            self.clock,
            Arc::clone(&self.storage.progress),
        )
    }
}
