//! `status` - lease state of every resource, then active deploys

use bub_core::humanize;

use crate::App;

pub async fn run(app: &App) -> Vec<String> {
    let now = app.now();
    let claims = app.claims.info().await;
    let deploys = app.deploys.info().await;

    let mut lines = Vec::with_capacity(claims.iter().count() + deploys.len());

    for (resource, lease) in claims.iter() {
        let claim = match lease {
            None => "*never claimed*".to_string(),
            Some(lease) if lease.is_active(now) => format!(
                "*{}'s* for the next {}",
                lease.holder,
                humanize::remaining(lease.expires_at, now)
            ),
            Some(_) => "*free*".to_string(),
        };

        let suffix = match app.activity() {
            Some(source) => format!(
                " (last active {})",
                humanize::ago(source.last_activity(resource).await, now)
            ),
            None => String::new(),
        };

        lines.push(format!("{resource}: {claim}{suffix}"));
    }

    lines.extend(
        deploys
            .iter()
            .map(|marker| format!("{} is currently deploying to {}", marker.holder, marker.resource)),
    );

    lines
}
