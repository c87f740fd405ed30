//! Handlebars templates for the Person views. Values are HTML-escaped by the registry.

use crate::model::Person;
use crate::service::{FormErrors, PersonForm, PERSON_RULES};
use crate::urls::Urls;
use axum::http::StatusCode;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use std::sync::{Arc, OnceLock};

pub const LAYOUT_PARTIAL: &str = "layout";
pub const LIST_TEMPLATE: &str = "demo/person_list.html";
pub const FORM_TEMPLATE: &str = "demo/person_form.html";
pub const CONFIRM_DELETE_TEMPLATE: &str = "demo/person_confirm_delete.html";
pub const ERROR_TEMPLATE: &str = "error.html";

pub struct Templates {
    registry: Handlebars<'static>,
}

#[derive(Serialize)]
struct ListRow<'a> {
    person: &'a Person,
    update_url: String,
    delete_url: String,
}

#[derive(Serialize)]
struct ListContext<'a> {
    template: &'static str,
    title: &'static str,
    people: Vec<ListRow<'a>>,
    create_url: String,
}

#[derive(Serialize)]
struct FieldContext<'a> {
    name: &'static str,
    id: String,
    label: &'static str,
    value: &'a str,
    input_type: &'static str,
    multiline: bool,
    required: bool,
    max_length: Option<usize>,
    errors: &'a [String],
}

#[derive(Serialize)]
struct FormContext<'a> {
    template: &'static str,
    title: &'a str,
    action: &'a str,
    index_url: String,
    fields: Vec<FieldContext<'a>>,
}

#[derive(Serialize)]
struct ConfirmDeleteContext<'a> {
    template: &'static str,
    title: &'static str,
    person: &'a Person,
    delete_url: String,
    index_url: String,
}

#[derive(Serialize)]
struct ErrorContext<'a> {
    template: &'static str,
    title: String,
    detail: Option<&'a str>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial(LAYOUT_PARTIAL, include_str!("../templates/layout.html"))?;
        registry.register_template_string(LIST_TEMPLATE, include_str!("../templates/demo/person_list.html"))?;
        registry.register_template_string(FORM_TEMPLATE, include_str!("../templates/demo/person_form.html"))?;
        registry.register_template_string(
            CONFIRM_DELETE_TEMPLATE,
            include_str!("../templates/demo/person_confirm_delete.html"),
        )?;
        registry.register_template_string(ERROR_TEMPLATE, include_str!("../templates/error.html"))?;
        Ok(Templates { registry })
    }

    /// Process-wide registry. Error responses are built outside request state and use it too.
    pub fn shared() -> Result<Arc<Templates>, TemplateError> {
        static SHARED: OnceLock<Arc<Templates>> = OnceLock::new();
        if let Some(t) = SHARED.get() {
            return Ok(t.clone());
        }
        let built = Arc::new(Templates::new()?);
        Ok(SHARED.get_or_init(|| built).clone())
    }

    pub fn person_list(&self, people: &[Person], urls: &Urls) -> Result<String, RenderError> {
        let ctx = ListContext {
            template: LIST_TEMPLATE,
            title: "People",
            people: people
                .iter()
                .map(|p| ListRow {
                    person: p,
                    update_url: urls.update(p.id),
                    delete_url: urls.delete(p.id),
                })
                .collect(),
            create_url: urls.create(),
        };
        self.registry.render(LIST_TEMPLATE, &ctx)
    }

    /// Create and update share one form page; `action` is the URL the form posts back to.
    pub fn person_form(
        &self,
        form: &PersonForm,
        errors: &FormErrors,
        action: &str,
        heading: &str,
        urls: &Urls,
    ) -> Result<String, RenderError> {
        let fields = PERSON_RULES
            .iter()
            .filter(|r| form.allowed().contains(&r.field))
            .map(|rule| FieldContext {
                name: rule.field,
                id: format!("id_{}", rule.field),
                label: rule.label,
                value: form.value(rule.field),
                input_type: if rule.format == Some("email") { "email" } else { "text" },
                multiline: rule.multiline,
                required: rule.required,
                max_length: rule.max_length,
                errors: errors.for_field(rule.field),
            })
            .collect();
        let ctx = FormContext {
            template: FORM_TEMPLATE,
            title: heading,
            action,
            index_url: urls.index(),
            fields,
        };
        self.registry.render(FORM_TEMPLATE, &ctx)
    }

    pub fn person_confirm_delete(&self, person: &Person, urls: &Urls) -> Result<String, RenderError> {
        let ctx = ConfirmDeleteContext {
            template: CONFIRM_DELETE_TEMPLATE,
            title: "Delete person",
            person,
            delete_url: urls.delete(person.id),
            index_url: urls.index(),
        };
        self.registry.render(CONFIRM_DELETE_TEMPLATE, &ctx)
    }

    pub fn error_page(&self, status: StatusCode, detail: Option<&str>) -> Result<String, RenderError> {
        let ctx = ErrorContext {
            template: ERROR_TEMPLATE,
            title: format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Error")
            ),
            detail,
        };
        self.registry.render(ERROR_TEMPLATE, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonFields, EDITABLE_FIELDS};
    use chrono::Utc;

    fn person(id: i64, name: &str) -> Person {
        Person {
            id,
            name: name.into(),
            email: "x@example.com".into(),
            bio: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn templates() -> Templates {
        Templates::new().expect("templates compile")
    }

    #[test]
    fn list_links_each_record_and_escapes() {
        let html = templates()
            .person_list(&[person(3, "<Ada>")], &Urls::new("/people"))
            .unwrap();
        assert!(html.contains("<!-- demo/person_list.html -->"));
        assert!(html.contains("<strong>&lt;Ada&gt;</strong>"));
        assert!(html.contains("href=\"/people/3/update\""));
        assert!(html.contains("href=\"/people/3/delete\""));
        assert!(html.contains("href=\"/people/create/\""));
        assert!(!html.contains("No people yet."));
    }

    #[test]
    fn empty_list_says_so() {
        let html = templates().person_list(&[], &Urls::default()).unwrap();
        assert!(html.contains("No people yet."));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn form_shows_values_and_errors() {
        let form = PersonForm::initial(
            EDITABLE_FIELDS,
            &PersonFields {
                name: "Ada \"the first\"".into(),
                email: String::new(),
                bio: "<b>line</b>".into(),
            },
        );
        let mut errors = FormErrors::default();
        errors.add("email", "This field is required.");
        let html = templates()
            .person_form(&form, &errors, "/create/", "Add person", &Urls::default())
            .unwrap();
        assert!(html.contains("<title>Add person</title>"));
        assert!(html.contains("value=\"Ada &quot;the first&quot;\" maxlength=\"100\" required>"));
        assert!(html.contains("<textarea name=\"bio\" id=\"id_bio\" rows=\"6\">&lt;b&gt;line&lt;/b&gt;</textarea>"));
        assert!(html.contains("<li>This field is required.</li>"));
        assert_eq!(html.matches("class=\"errorlist\"").count(), 1);
        assert!(html.contains("action=\"/create/\""));
    }

    #[test]
    fn confirm_page_posts_to_delete_url() {
        let html = templates()
            .person_confirm_delete(&person(5, "Ada"), &Urls::default())
            .unwrap();
        assert!(html.contains("action=\"/5/delete\""));
        assert!(html.contains("delete \"Ada\"?"));
    }

    #[test]
    fn error_page_has_status_title() {
        let html = templates()
            .error_page(StatusCode::NOT_FOUND, Some("no person 9"))
            .unwrap();
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("<p>no person 9</p>"));
    }

    #[test]
    fn shared_registry_is_reused() {
        let a = Templates::shared().unwrap();
        let b = Templates::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
