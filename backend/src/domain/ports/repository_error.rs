//! Error type shared by the catalogue repository ports.

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established or was lost.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
        /// A replace targeted a row that no longer exists.
        MissingRow => "catalogue record not found",
        /// A write referenced a parent row that does not exist.
        MissingParent { parent: String, id: i64 } =>
            "{parent} not found with ID: {id}",
    }
}
