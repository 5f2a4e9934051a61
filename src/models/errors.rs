use thiserror::Error;

/// Service-level errors that can occur in business logic.
///
/// Display strings are the user-visible messages returned in `{"error": …}`
/// bodies, except for `Repository`, which is always masked behind the fixed
/// internal-error message at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Producto no encontrado.")]
    ProductNotFound { id: String },

    #[error("Carrito no encontrado.")]
    CartNotFound { id: String },

    #[error("Ya existe un carrito con este id.")]
    DuplicateCart { id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for collection file access
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    /// `price`, `status` or `stock` was absent or carried the wrong JSON type.
    #[error("El precio debe ser un número, el estado debe ser un booleano y el stock debe ser un número.")]
    InvalidFieldTypes,

    #[error("Los campos 'title', 'description', 'code' y 'category' son obligatorios y no pueden estar vacíos.")]
    MissingRequiredFields,

    #[error("El campo {field} no puede estar vacío.")]
    EmptyField { field: String },

    #[error("Cuerpo de la solicitud inválido.")]
    MalformedBody,
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
