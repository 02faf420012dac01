use std::sync::Arc;

use studio_flux::StateStore;
use tracing::{error, info, warn};

use crate::SiteContext;
use crate::contact::ContactField;
use crate::email::TemplatedEmail;
use crate::request::{ContactSubmitReq, ContactUpdateReq};
use crate::state::{ContactFormState, SendStatus};

/// Handle `contact/update`.
pub async fn handle_update(req: &ContactUpdateReq, store: &Arc<StateStore>, _: &SiteContext) {
    let Some(field) = ContactField::from_name(&req.field) else {
        warn!(field = %req.field, "unknown contact field");
        return;
    };
    store.update::<ContactFormState, _>(ContactFormState::PATH, |state| {
        state.form.set(field, &req.value);
        state.errors.retain(|e| e.field != field);
        state.status = SendStatus::Idle;
    });
}

/// Handle `contact/submit`. The form is cleared only after the email
/// service accepted the message.
pub async fn handle_submit(_: &ContactSubmitReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    let state = store
        .get_as::<ContactFormState>(ContactFormState::PATH)
        .unwrap_or_default();
    if state.status == SendStatus::Sending {
        return;
    }
    let errors = state.form.validate();
    if !errors.is_empty() {
        store.set(
            ContactFormState::PATH,
            ContactFormState {
                errors,
                status: SendStatus::Idle,
                ..state
            },
        );
        return;
    }

    store.set(
        ContactFormState::PATH,
        ContactFormState {
            errors: Vec::new(),
            status: SendStatus::Sending,
            ..state.clone()
        },
    );

    let email = TemplatedEmail::new(&ctx.email_settings, state.form.template_fields());
    match ctx.email.send(&email).await {
        Ok(()) => {
            info!("contact message sent");
            store.set(
                ContactFormState::PATH,
                ContactFormState {
                    status: SendStatus::Sent,
                    ..Default::default()
                },
            );
        }
        Err(e) => {
            error!(error = %e, "contact message failed");
            store.set(
                ContactFormState::PATH,
                ContactFormState {
                    status: SendStatus::Failed,
                    ..state
                },
            );
        }
    }
}
