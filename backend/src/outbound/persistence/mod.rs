//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the catalogue repository
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to
//!   [`crate::domain::ports::CatalogueRepositoryError`]; foreign key
//!   violations on a parent become `MissingParent`.
//!
//! # Example
//!
//! ```ignore
//! use course_catalogue::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/catalogue");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselCourseRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_course_module_repository;
mod diesel_course_repository;
pub(crate) mod diesel_helpers;
mod diesel_material_repository;
mod diesel_subject_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_module_repository::DieselCourseModuleRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_material_repository::DieselMaterialRepository;
pub use diesel_subject_repository::DieselSubjectRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
