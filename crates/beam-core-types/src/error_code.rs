//! Stable error codes
//!
//! Errors that cross a logging boundary expose a stable, machine-readable
//! code (e.g. `ERR_MIGRATION_FAILED`) and a short kind name. The logging
//! macros read both through this trait.

/// An error with a stable code and kind name
pub trait ErrorCode {
    /// Stable code, e.g. `ERR_STORE_UNAVAILABLE`
    fn code(&self) -> &'static str;

    /// Short kind name, e.g. `StoreUnavailable`
    fn kind_name(&self) -> &'static str;
}

impl<T: ErrorCode + ?Sized> ErrorCode for &T {
    fn code(&self) -> &'static str {
        (**self).code()
    }

    fn kind_name(&self) -> &'static str {
        (**self).kind_name()
    }
}
