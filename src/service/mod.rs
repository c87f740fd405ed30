//! Form binding and validation for Person submissions.

mod validation;
pub use validation::{FieldRule, FormErrors, PersonForm, PERSON_RULES};
