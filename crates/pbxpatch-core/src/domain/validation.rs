use crate::domain::{
    entities::{GroupSpec, ObjectRef, PatchPlan},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entity-local rules live on the entities; this adds the checks that only
/// matter once values are interpolated into manifest text.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_plan(plan: &PatchPlan) -> Result<(), DomainError> {
        plan.validate()?;
        Self::validate_group(&plan.group)?;
        for (field, anchor) in [
            ("parent group", &plan.parent_group),
            ("sibling", &plan.sibling),
            ("sources phase", &plan.sources_phase),
        ] {
            Self::validate_anchor(field, anchor)?;
        }
        Ok(())
    }

    pub fn validate_group(group: &GroupSpec) -> Result<(), DomainError> {
        if let Some(bad) = forbidden_fragment(&group.name) {
            return Err(DomainError::InvalidPlan(format!(
                "group name '{}' contains {bad}",
                group.name
            )));
        }
        if group.path.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidPlan(format!(
                "group path '{}' contains whitespace",
                group.path
            )));
        }
        if let Some(bad) = forbidden_fragment(&group.path) {
            return Err(DomainError::InvalidPlan(format!(
                "group path '{}' contains {bad}",
                group.path
            )));
        }
        Ok(())
    }

    pub fn validate_anchor(field: &str, anchor: &ObjectRef) -> Result<(), DomainError> {
        match forbidden_fragment(&anchor.name) {
            Some(bad) => Err(DomainError::InvalidPlan(format!(
                "{field} name '{}' contains {bad}",
                anchor.name
            ))),
            None => Ok(()),
        }
    }
}

fn forbidden_fragment(value: &str) -> Option<&'static str> {
    if value.contains("*/") || value.contains("/*") {
        Some("a comment delimiter")
    } else if value.contains(';') || value.contains('"') {
        Some("';' or '\"'")
    } else if value.contains('\n') || value.contains('\r') {
        Some("a line break")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_is_valid() {
        assert!(DomainValidator::validate_plan(&PatchPlan::default()).is_ok());
    }

    #[test]
    fn group_name_may_contain_spaces_but_path_may_not() {
        assert!(DomainValidator::validate_group(&GroupSpec::new("My Views").with_path("Views")).is_ok());
        assert!(DomainValidator::validate_group(&GroupSpec::new("My Views")).is_err());
    }

    #[test]
    fn comment_delimiters_are_rejected() {
        let anchor = ObjectRef::named("Models */");
        assert!(matches!(
            DomainValidator::validate_anchor("sibling", &anchor),
            Err(DomainError::InvalidPlan(msg)) if msg.contains("sibling")
        ));
    }
}
