//! Campaign-stage catalog vocabulary.

pub const WORKFLOW_SEQUENCE: &str = "sequence";
pub const WORKFLOW_PARALLEL: &str = "parallel";

/// All valid `workflow_type` values.
pub const VALID_WORKFLOW_TYPES: &[&str] = &[WORKFLOW_SEQUENCE, WORKFLOW_PARALLEL];

pub const STAGE_PENDING: &str = "pending";
pub const STAGE_IN_PROGRESS: &str = "inprogress";
pub const STAGE_COMPLETED: &str = "completed";

/// All valid catalog stage status values.
pub const VALID_STAGE_STATUSES: &[&str] = &[STAGE_PENDING, STAGE_IN_PROGRESS, STAGE_COMPLETED];

/// Active flag used by marketing entries, brands and products.
pub const ACTIVE: i32 = 1;
pub const INACTIVE: i32 = 0;

pub fn validate_workflow_type(value: &str) -> Result<(), String> {
    one_of("workflowType", value, VALID_WORKFLOW_TYPES)
}

pub fn validate_stage_status(value: &str) -> Result<(), String> {
    one_of("status", value, VALID_STAGE_STATUSES)
}

/// Validate a 0/1 active flag.
pub fn validate_active_flag(value: i32) -> Result<(), String> {
    if value == ACTIVE || value == INACTIVE {
        Ok(())
    } else {
        Err(format!("Invalid status {value}. Must be 0 or 1"))
    }
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_types() {
        assert!(validate_workflow_type("sequence").is_ok());
        assert!(validate_workflow_type("parallel").is_ok());
        let err = validate_workflow_type("random").unwrap_err();
        assert!(err.contains("workflowType"));
    }

    #[test]
    fn stage_statuses() {
        assert!(validate_stage_status("inprogress").is_ok());
        assert!(validate_stage_status("in_progress").is_err());
    }

    #[test]
    fn active_flag() {
        assert!(validate_active_flag(0).is_ok());
        assert!(validate_active_flag(1).is_ok());
        assert!(validate_active_flag(2).is_err());
    }
}
