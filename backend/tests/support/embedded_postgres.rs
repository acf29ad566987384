//! Embedded PostgreSQL database preparation for integration tests.
//!
//! Database reset uses `postgres` so `DROP DATABASE` runs outside any Diesel
//! transaction. Schema setup goes through the crate's embedded migrations so
//! test schemas cannot drift from production.

use course_catalogue::outbound::persistence::apply_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Drop and recreate `name` on the cluster's maintenance database.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Apply every pending migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    apply_migrations(url)
        .map(|_| ())
        .map_err(|err| err.to_string())
}
