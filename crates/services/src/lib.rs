#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod progress;

pub use med_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::AppServicesError;
pub use progress::{ProgressSnapshot, QuizProgressStore, QuizSession};
