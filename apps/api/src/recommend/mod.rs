//! Content-based recommenders: jobs for a freelancer, freelancers for a job.
//! Both build text documents from marketplace records and rank them through
//! `text::similarity::rank_documents`.

pub mod freelancers;
pub mod handlers;
pub mod jobs;

use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_TOP_N: usize = 50;

/// Resolves the requested result count, falling back to `default`.
pub fn resolve_top_n(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    let top_n = requested.unwrap_or(default);
    if top_n == 0 || top_n > MAX_TOP_N {
        return Err(AppError::Validation(format!(
            "top_n must be between 1 and {MAX_TOP_N}, got {top_n}"
        )));
    }
    Ok(top_n)
}

/// Parses a record ID, reporting `what` in the validation message.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("Invalid {what} ID format")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_top_n_defaults() {
        assert_eq!(resolve_top_n(None, 5).unwrap(), 5);
        assert_eq!(resolve_top_n(Some(12), 5).unwrap(), 12);
    }

    #[test]
    fn test_resolve_top_n_rejects_out_of_range() {
        assert!(matches!(resolve_top_n(Some(0), 5), Err(AppError::Validation(_))));
        assert!(matches!(
            resolve_top_n(Some(MAX_TOP_N + 1), 5),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_id_rejects_object_id_style_strings() {
        let err = parse_id("64b7f0c2e1a4", "job").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid job ID format");
    }

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {id} "), "job").unwrap(), id);
    }
}
