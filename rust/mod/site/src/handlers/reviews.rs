use std::sync::Arc;

use studio_flux::StateStore;
use tracing::error;

use crate::SiteContext;
use crate::request::{ReviewEditReq, SubmitReviewReq};
use crate::state::ReviewFormState;

/// Handle `reviews/update`. Text over the limit is refused, keeping the
/// previous text.
pub async fn handle_edit(req: &ReviewEditReq, store: &Arc<StateStore>, _: &SiteContext) {
    store.update::<ReviewFormState, _>(ReviewFormState::PATH, |form| {
        if let Some(name) = &req.name {
            form.draft.name = name.clone();
        }
        if let Some(rating) = req.rating {
            form.draft.rating = rating;
        }
        if let Some(text) = &req.text {
            form.draft.set_text(text);
        }
        form.remaining = form.draft.remaining_chars();
        form.submitted = false;
        form.error = None;
    });
}

/// Handle `reviews/submit`.
pub async fn handle_submit(_: &SubmitReviewReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    let form = store.update::<ReviewFormState, _>(ReviewFormState::PATH, |form| {
        form.submitting = true;
        form.error = None;
    });

    match ctx.gallery.submit_review(&form.draft) {
        Ok(_) => store.set(
            ReviewFormState::PATH,
            ReviewFormState {
                submitted: true,
                ..Default::default()
            },
        ),
        Err(e) => {
            let message = if e.is_validation() {
                e.to_string()
            } else {
                error!(error = %e, "review submit failed");
                "Failed to submit review. Please try again.".to_string()
            };
            store.update::<ReviewFormState, _>(ReviewFormState::PATH, |form| {
                form.submitting = false;
                form.error = Some(message);
            });
        }
    }
}
