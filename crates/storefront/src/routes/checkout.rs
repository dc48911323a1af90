//! Checkout route handlers.
//!
//! The form posts each changed field to `/checkout/draft` as it is typed, so
//! the stored draft is always current. Placing the order renders the
//! thank-you page, which sends the browser home after the configured delay.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use eshop_core::{CheckoutDraft, CheckoutField};
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::{CheckoutError, CheckoutForm, DraftStore};
use crate::error::Result;
use crate::models::session::{load_cart, save_cart};
use crate::state::AppState;

/// Form input display data for templates.
#[derive(Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
}

impl FieldView {
    fn all(draft: &CheckoutDraft) -> Vec<Self> {
        CheckoutField::ALL
            .into_iter()
            .map(|field| Self {
                name: field.key(),
                label: field.label(),
                input_type: field.input_type(),
                value: draft.get(field).to_string(),
            })
            .collect()
    }
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub cart_count: usize,
    pub fields: Vec<FieldView>,
    pub error: Option<String>,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/thank_you.html")]
pub struct ThankYouTemplate {
    pub cart_count: usize,
    pub refresh: String,
}

/// Posted form fields in submission order.
type FieldPairs = Vec<(String, String)>;

/// Apply posted fields to the form, skipping names that are not form fields.
async fn apply_fields(
    form: &mut CheckoutForm,
    store: &DraftStore,
    pairs: FieldPairs,
) -> std::result::Result<(), CheckoutError> {
    for (name, value) in pairs {
        match name.parse::<CheckoutField>() {
            Ok(field) => form.change(store, field, value).await?,
            Err(err) => tracing::debug!(%err, "Ignoring posted value"),
        }
    }
    Ok(())
}

/// Display the checkout form, prefilled from the stored draft.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CheckoutFormTemplate> {
    let cart = load_cart(&session).await?;
    let form = CheckoutForm::mount(&DraftStore::new(session)).await?;

    Ok(CheckoutFormTemplate {
        cart_count: cart.len(),
        fields: FieldView::all(form.draft()),
        error: None,
    })
}

/// Store changed fields (HTMX).
#[instrument(skip(session, pairs))]
pub async fn draft(session: Session, Form(pairs): Form<FieldPairs>) -> Result<StatusCode> {
    let store = DraftStore::new(session);
    let mut form = CheckoutForm::mount(&store).await?;
    apply_fields(&mut form, &store, pairs).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Place the order.
#[instrument(skip(state, session, pairs))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<FieldPairs>,
) -> Result<Response> {
    let store = DraftStore::new(session.clone());
    let mut form = CheckoutForm::mount(&store).await?;
    apply_fields(&mut form, &store, pairs).await?;

    let mut cart = load_cart(&session).await?;
    match form
        .submit(&store, &mut cart, state.config().redirect_delay)
        .await
    {
        Ok(redirect) => {
            save_cart(&session, &cart).await?;

            let refresh = redirect.refresh_header();
            let mut response = ThankYouTemplate {
                cart_count: cart.len(),
                refresh: refresh.clone(),
            }
            .into_response();
            if let Ok(value) = HeaderValue::from_str(&refresh) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static("refresh"), value);
            }
            Ok(response)
        }
        Err(err @ CheckoutError::MissingFields(_)) => {
            tracing::info!(%err, "Checkout incomplete");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutFormTemplate {
                    cart_count: cart.len(),
                    fields: FieldView::all(form.draft()),
                    error: Some(err.to_string()),
                },
            )
                .into_response())
        }
        Err(err) => Err(err.into()),
    }
}
