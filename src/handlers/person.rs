//! Person views: list, create, update, delete. Mutating views redirect to the index on success.

use crate::error::AppError;
use crate::model::{Person, PersonFields, EDITABLE_FIELDS, UPDATE_FIELDS};
use crate::response::{page, redirect_found};
use crate::service::{FormErrors, PersonForm};
use crate::state::AppState;
use crate::urls::RouteName;
use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use std::collections::HashMap;

/// Route segments are digits only; anything else is simply not a match.
fn parse_pk(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound(format!("no route for '{}'", raw)));
    }
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("no route for '{}'", raw)))
}

async fn load(state: &AppState, raw_pk: &str) -> Result<Person, AppError> {
    let pk = parse_pk(raw_pk)?;
    state
        .store
        .get(pk)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no person with pk {}", pk)))
}

fn success_redirect(state: &AppState) -> Result<Response, AppError> {
    let location = state.urls.route(RouteName::Index, None)?;
    Ok(redirect_found(&location))
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let people = state.store.list().await?;
    Ok(page(state.templates.person_list(&people, &state.urls)?))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Response, AppError> {
    let form = PersonForm::initial(EDITABLE_FIELDS, &PersonFields::default());
    Ok(page(state.templates.person_form(
        &form,
        &FormErrors::default(),
        &state.urls.create(),
        "Add person",
        &state.urls,
    )?))
}

pub async fn create(
    State(state): State<AppState>,
    Form(data): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let form = PersonForm::bind(EDITABLE_FIELDS, data);
    match form.validate(&PersonFields::default()) {
        Ok(fields) => {
            let person = state.store.create(&fields).await?;
            tracing::info!(pk = person.id, "person created");
            success_redirect(&state)
        }
        Err(errors) => {
            tracing::warn!(fields = ?errors.fields().collect::<Vec<_>>(), "create form invalid");
            Ok(page(state.templates.person_form(
                &form,
                &errors,
                &state.urls.create(),
                "Add person",
                &state.urls,
            )?))
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> Result<Response, AppError> {
    let person = load(&state, &pk).await?;
    let form = PersonForm::initial(UPDATE_FIELDS, &person.fields());
    Ok(page(state.templates.person_form(
        &form,
        &FormErrors::default(),
        &state.urls.update(person.id),
        "Edit person",
        &state.urls,
    )?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    Form(data): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let person = load(&state, &pk).await?;
    let form = PersonForm::bind(UPDATE_FIELDS, data);
    match form.validate(&person.fields()) {
        Ok(fields) => {
            state
                .store
                .update(person.id, &fields)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("no person with pk {}", person.id)))?;
            tracing::info!(pk = person.id, "person updated");
            success_redirect(&state)
        }
        Err(errors) => {
            tracing::warn!(pk = person.id, fields = ?errors.fields().collect::<Vec<_>>(), "update form invalid");
            Ok(page(state.templates.person_form(
                &form,
                &errors,
                &state.urls.update(person.id),
                "Edit person",
                &state.urls,
            )?))
        }
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> Result<Response, AppError> {
    let person = load(&state, &pk).await?;
    Ok(page(state.templates.person_confirm_delete(&person, &state.urls)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> Result<Response, AppError> {
    let pk = parse_pk(&pk)?;
    if !state.store.delete(pk).await? {
        return Err(AppError::NotFound(format!("no person with pk {}", pk)));
    }
    tracing::info!(pk, "person deleted");
    success_redirect(&state)
}
