//! `take [resource] [duration]` - lease a resource

use bub_core::{humanize, resolve_take};

use super::{error_reply, Invocation};
use crate::App;

pub async fn run(app: &App, invocation: &Invocation) -> Vec<String> {
    let now = app.now();
    let user = invocation.user.as_str();

    let line = match resolve_take(&invocation.tokens(), &app.claims, user, now).await {
        Ok(lease) => format!(
            "<@{user}> has {} for the next {}",
            lease.resource,
            humanize::remaining(lease.expires_at, now)
        ),
        Err(e) => error_reply(app, user, &e),
    };

    vec![line]
}
