use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Kind of priced entity, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    LineItem,
    ShippingMethod,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::LineItem => write!(f, "line item"),
            EntityKind::ShippingMethod => write!(f, "shipping method"),
        }
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Tax computation was requested but no tax lines were loaded
    #[error("Tax lines must be joined to calculate taxes for {entity} {id}")]
    MissingTaxLines { entity: EntityKind, id: String },

    /// Refund requested for an item whose tax lines were never loaded
    #[error("Tax lines must be joined on line item {id} to calculate its refund")]
    MissingRefundTaxLines { id: String },

    /// Tax line provider failures
    #[error("Tax provider error: {0}")]
    TaxProvider(String),

    /// Tax calculation strategy failures
    #[error("Tax calculation error: {0}")]
    TaxCalculation(String),

    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input/output errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status class a transport layer should map this error to
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::MissingTaxLines { .. } => 422,
            AppError::MissingRefundTaxLines { .. } => 400,
            AppError::Validation(_) => 400,
            AppError::Json(_) => 400,
            AppError::TaxProvider(_) | AppError::TaxCalculation(_) => 502,
            AppError::Configuration(_) | AppError::Io(_) => 500,
        }
    }

    pub fn missing_tax_lines(entity: EntityKind, id: impl Into<String>) -> Self {
        AppError::MissingTaxLines {
            entity,
            id: id.into(),
        }
    }

    pub fn missing_refund_tax_lines(id: impl Into<String>) -> Self {
        AppError::MissingRefundTaxLines { id: id.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn tax_provider(msg: impl Into<String>) -> Self {
        AppError::TaxProvider(msg.into())
    }

    pub fn tax_calculation(msg: impl Into<String>) -> Self {
        AppError::TaxCalculation(msg.into())
    }
}
