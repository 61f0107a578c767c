//! `deploy <resource>` - start a deploy
//!
//! A registry resource can only be deployed by the user holding its active
//! lease. Deploy-only targets need no lease. Either way the deploy lock is a
//! compare-and-set: an in-progress deploy is never displaced.

use bub_core::{Error, Result};
use chrono::{DateTime, Utc};

use super::{error_reply, Invocation};
use crate::App;

pub async fn run(app: &App, invocation: &Invocation) -> Vec<String> {
    let user = invocation.user.as_str();

    let Some(resource) = invocation.args.first() else {
        return vec![format!(
            "Which server, <@{user}>? Try `{} deploy <server>`.",
            app.config().trigger_word
        )];
    };

    let line = match request(app, resource, user, app.now()).await {
        Ok(()) => format!("<@{user}> is deploying to {resource}!"),
        Err(e) => error_reply(app, user, &e),
    };

    vec![line]
}

async fn request(app: &App, resource: &str, user: &str, now: DateTime<Utc>) -> Result<()> {
    validate_params(app, resource, user, now).await?;
    app.deploys.try_deploy(resource, user, now).await?;
    Ok(())
}

/// Check the deploy precondition without touching the lock
async fn validate_params(app: &App, resource: &str, user: &str, now: DateTime<Utc>) -> Result<()> {
    if app.claims.registry().contains(resource) {
        let leased = app
            .claims
            .lease(resource)
            .await
            .is_some_and(|lease| lease.is_held_by(user, now));
        if leased {
            Ok(())
        } else {
            Err(Error::PreconditionFailed {
                resource: resource.to_string(),
                user: user.to_string(),
            })
        }
    } else if app.config().is_deploy_target(resource) {
        Ok(())
    } else {
        Err(Error::UnknownResource(resource.to_string()))
    }
}
