//! Binds submitted form data to the allowed Person fields and validates it.

use crate::model::{PersonFields, EMAIL_MAX_LENGTH, NAME_MAX_LENGTH};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Per-field rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub max_length: Option<usize>,
    pub format: Option<&'static str>,
    pub multiline: bool,
}

pub const PERSON_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        label: "Name",
        required: true,
        max_length: Some(NAME_MAX_LENGTH),
        format: None,
        multiline: false,
    },
    FieldRule {
        field: "email",
        label: "Email",
        required: true,
        max_length: Some(EMAIL_MAX_LENGTH),
        format: Some("email"),
        multiline: false,
    },
    FieldRule {
        field: "bio",
        label: "Bio",
        required: false,
        max_length: None,
        format: None,
        multiline: true,
    },
];

/// Field name to messages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        PERSON_RULES
            .iter()
            .map(|r| r.field)
            .filter(move |f| self.0.contains_key(*f))
    }
}

/// A bound form: raw submitted values for the allowed fields only.
#[derive(Debug, Clone)]
pub struct PersonForm {
    allowed: &'static [&'static str],
    values: HashMap<String, String>,
}

impl PersonForm {
    /// Unbound form showing `initial` values (empty for create).
    pub fn initial(allowed: &'static [&'static str], initial: &PersonFields) -> Self {
        let values = allowed
            .iter()
            .filter_map(|f| initial.get(f).map(|v| (f.to_string(), v.to_string())))
            .collect();
        PersonForm { allowed, values }
    }

    /// Bind submitted data. Keys outside `allowed` are dropped.
    pub fn bind(allowed: &'static [&'static str], data: HashMap<String, String>) -> Self {
        let values = data
            .into_iter()
            .filter(|(k, _)| allowed.contains(&k.as_str()))
            .collect();
        PersonForm { allowed, values }
    }

    pub fn allowed(&self) -> &'static [&'static str] {
        self.allowed
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Clean and validate. Fields outside the allow-list keep their value from `base`.
    pub fn validate(&self, base: &PersonFields) -> Result<PersonFields, FormErrors> {
        let mut errors = FormErrors::default();
        let mut cleaned = base.clone();
        for rule in PERSON_RULES.iter().filter(|r| self.allowed.contains(&r.field)) {
            let value = self.value(rule.field).trim();
            if let Err(msg) = check(rule, value) {
                errors.add(rule.field, msg);
                continue;
            }
            match rule.field {
                "name" => cleaned.name = value.to_string(),
                "email" => cleaned.email = value.to_string(),
                "bio" => cleaned.bio = value.to_string(),
                _ => {}
            }
        }
        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}

fn check(rule: &FieldRule, value: &str) -> Result<(), String> {
    // PostgreSQL TEXT cannot hold 0x00.
    if value.contains('\0') {
        return Err("Null characters are not allowed.".into());
    }
    if value.is_empty() {
        return if rule.required {
            Err("This field is required.".into())
        } else {
            Ok(())
        };
    }
    if let Some(max) = rule.max_length {
        let len = value.chars().count();
        if len > max {
            return Err(format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, len
            ));
        }
    }
    if rule.format == Some("email") && !email_regex().is_match(value) {
        return Err("Enter a valid email address.".into());
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@([A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
            .expect("static email pattern compiles")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EDITABLE_FIELDS, EMAIL_MAX_LENGTH, UPDATE_FIELDS};

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn valid_submission_is_trimmed() {
        let form = PersonForm::bind(
            EDITABLE_FIELDS,
            data(&[("name", "  Ada "), ("email", "ada@example.com"), ("bio", "")]),
        );
        let fields = form.validate(&PersonFields::default()).unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(fields.bio, "");
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", "   ")]));
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(errors.for_field("name"), ["This field is required."]);
        assert_eq!(errors.for_field("email"), ["This field is required."]);
        assert!(errors.for_field("bio").is_empty());
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", "Ada"), ("email", bad)]));
            let errors = form.validate(&PersonFields::default()).unwrap_err();
            assert_eq!(errors.for_field("email"), ["Enter a valid email address."], "{bad}");
        }
    }

    #[test]
    fn length_limit_counts_characters() {
        let long = "é".repeat(NAME_MAX_LENGTH + 1);
        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", &long), ("email", "a@b.io")]));
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(
            errors.for_field("name"),
            ["Ensure this value has at most 100 characters (it has 101)."]
        );

        let exact = "é".repeat(NAME_MAX_LENGTH);
        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", &exact), ("email", "a@b.io")]));
        assert!(form.validate(&PersonFields::default()).is_ok());
    }

    #[test]
    fn email_length_limit() {
        let local = "a".repeat(EMAIL_MAX_LENGTH - "@example.com".len() + 1);
        let email = format!("{}@example.com", local);
        assert_eq!(email.len(), 255);
        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", "Ada"), ("email", &email)]));
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(
            errors.for_field("email"),
            ["Ensure this value has at most 254 characters (it has 255)."]
        );
    }

    #[test]
    fn null_characters_are_rejected_in_every_field() {
        let form = PersonForm::bind(
            EDITABLE_FIELDS,
            data(&[("name", "Ada\0"), ("email", "ada@example.com"), ("bio", "x\0y")]),
        );
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(errors.for_field("name"), ["Null characters are not allowed."]);
        assert_eq!(errors.for_field("bio"), ["Null characters are not allowed."]);
        assert!(errors.for_field("email").is_empty());

        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("name", "Ada"), ("email", "ada@exa\0mple.com")]));
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(errors.for_field("email"), ["Null characters are not allowed."]);
    }

    #[test]
    fn error_fields_follow_form_order() {
        let form = PersonForm::bind(EDITABLE_FIELDS, data(&[("bio", "\0")]));
        let errors = form.validate(&PersonFields::default()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["name", "email", "bio"]);
    }

    #[test]
    fn unknown_keys_never_bind() {
        let form = PersonForm::bind(
            UPDATE_FIELDS,
            data(&[("name", "Ada"), ("email", "a@b.io"), ("id", "99"), ("created_at", "x")]),
        );
        assert_eq!(form.value("id"), "");
        assert_eq!(form.value("created_at"), "");
    }

    #[test]
    fn fields_outside_allow_list_keep_base_values() {
        const NAME_ONLY: &[&str] = &["name"];
        let base = PersonFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            bio: "math".into(),
        };
        let form = PersonForm::bind(NAME_ONLY, data(&[("name", "Ada L."), ("email", "nope")]));
        let fields = form.validate(&base).unwrap();
        assert_eq!(fields.name, "Ada L.");
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(fields.bio, "math");
    }

    #[test]
    fn initial_form_shows_record_values() {
        let base = PersonFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            bio: "math".into(),
        };
        let form = PersonForm::initial(UPDATE_FIELDS, &base);
        assert_eq!(form.value("name"), "Ada");
        assert_eq!(form.value("bio"), "math");
    }
}
