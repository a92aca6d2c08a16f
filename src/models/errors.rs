use thiserror::Error;

use crate::types::EmpId;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid argument for employee [{emp_no}]: {reason}")]
    InvalidArgument { emp_no: EmpId, reason: String },
    #[error("No advance account exists for employee [{emp_no}]")]
    NotFound { emp_no: EmpId },
    #[error("An advance account already exists for employee [{emp_no}]")]
    AlreadyExists { emp_no: EmpId },
}

impl LedgerError {
    //NOTE: Every variant carries the same employee context, so small factory
    //      constructors keep the call sites from repeating the struct syntax.

    pub fn invalid_argument(emp_no: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            emp_no: emp_no.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(emp_no: &str) -> Self {
        Self::NotFound {
            emp_no: emp_no.to_string(),
        }
    }

    pub fn already_exists(emp_no: &str) -> Self {
        Self::AlreadyExists {
            emp_no: emp_no.to_string(),
        }
    }
}
