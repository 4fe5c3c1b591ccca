use crate::app::{App, Message, Model};
use crate::form::deliver;

impl App {
    /// Deliver the validated form through the relay.
    ///
    /// Blocks until the relay answers. The outcome is reported through the
    /// model's toaster; the returned message finishes the submission.
    pub(super) fn run_submission(&self, model: &mut Model) -> Message {
        let _scope = crate::perf::scope("app.submit");
        let email = model.email.text();
        let message = model.message.text();
        crate::perf::log_event(
            "submit.start",
            format!(
                "to={email} chars={} font={}px",
                message.chars().count(),
                model.font_size.px()
            ),
        );
        let delivery = deliver(
            &email,
            &message,
            model.font_size,
            self.relay.as_ref(),
            &mut model.toaster,
        );
        crate::perf::log_event("submit.done", format!("outcome={delivery:?}"));
        Message::Delivered(delivery)
    }

    pub(super) fn handle_message_side_effects(&self, model: &Model, msg: &Message) {
        match msg {
            Message::Submit if !model.errors.is_empty() => {
                tracing::debug!(errors = ?model.errors, "submission blocked by validation");
            }
            Message::Toolbar(action) => {
                crate::perf::log_event(
                    "toolbar.apply",
                    format!(
                        "action={action:?} pending_restore={}",
                        model.message.has_pending_selection()
                    ),
                );
            }
            _ => {}
        }
    }
}
