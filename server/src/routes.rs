use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json,
};
use color_eyre::Report;
use maud::html;
use serde::Serialize;
use tracing::info;

use crate::{
    components::{
        form::FormView,
        layout::{Card, Page},
        ui::heading::Heading,
    },
    errors::{ServerResult, WithStatus},
    form::{FormData, InputForm, ResultContainer, SubmitOutcome},
    state::AppState,
    validation::{self, FieldName, ValidationResult},
};

/// Build the application router with all routes
pub fn routes(app_state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(form_page).post(submit_form))
        .route("/api/validate", post(validate_api))
        .route("/api/validate/:field", post(validate_field_api))
        .route("/api/submit", post(submit_api))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

fn render_page(form: &InputForm) -> Page {
    let view = FormView::new(form, "/");

    let content = html! {
        (Heading::h1("Input form"))
        (view)
        (Heading::h2("Rules"))
        p class="mt-4 text-sm text-gray-500" {
            "Full name: three words. Email: ya.ru, yandex.ru, yandex.ua, yandex.by, yandex.kz or yandex.com. "
            "Phone: +7(111)222-33-11 with a digit sum below 30."
        }
    };

    Page::new("Input form", Card::new(content).with_max_width("max-w-lg"))
}

async fn form_page(State(state): State<AppState>) -> Page {
    render_page(&state.new_form())
}

async fn submit_form(State(state): State<AppState>, Form(data): Form<FormData>) -> Page {
    let mut form = state.new_form();
    form.set_data(&data);

    let outcome = form.submit(&state.submit_client).await;
    info!(?outcome, "Form submission finished");

    render_page(&form)
}

async fn validate_api(Json(data): Json<FormData>) -> Json<ValidationResult> {
    Json(validation::validate(&data))
}

#[derive(Debug, Serialize)]
struct FieldValidation {
    field: FieldName,
    valid: bool,
}

async fn validate_field_api(
    Path(field): Path<String>,
    value: String,
) -> ServerResult<Json<FieldValidation>, StatusCode> {
    let field = field
        .parse::<FieldName>()
        .map_err(Report::from)
        .with_status(StatusCode::NOT_FOUND)?;

    Ok(Json(FieldValidation {
        field,
        valid: validation::validate_field(field, &value),
    }))
}

#[derive(Debug, Serialize)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub data: FormData,
    pub result: ResultContainer,
}

async fn submit_api(
    State(state): State<AppState>,
    Json(data): Json<FormData>,
) -> (StatusCode, Json<SubmitReport>) {
    let mut form = state.new_form();
    form.set_data(&data);

    let outcome = form.submit(&state.submit_client).await;
    let status = match &outcome {
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    let report = SubmitReport {
        outcome,
        data: form.get_data(),
        result: form.result().clone(),
    };

    (status, Json(report))
}
