//! Chat commands
//!
//! Each command answers to a fixed set of case-insensitive alias words. The
//! first word of a message picks the command; the rest become its arguments.
//! Messages that match no command are ignored without a reply.

pub mod deploy;
pub mod status;
pub mod take;

use bub_core::Error as CoreError;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, error, info, warn};

use crate::{reply::ReplySink, App};

/// Known commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Status,
    Take,
    Deploy,
}

impl Command {
    /// Words this command answers to
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Status => &["status", "info", "list"],
            Self::Take => &["take"],
            Self::Deploy => &["deploy"],
        }
    }

    /// Command answering to `word`, ignoring case
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        Self::iter().find(|command| {
            command
                .aliases()
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(word))
        })
    }

    /// Run the command and collect its reply lines
    pub async fn run(self, app: &App, invocation: &Invocation) -> Vec<String> {
        match self {
            Self::Status => status::run(app).await,
            Self::Take => take::run(app, invocation).await,
            Self::Deploy => deploy::run(app, invocation).await,
        }
    }
}

/// One inbound command, consumed synchronously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub args: Vec<String>,
    pub user: String,
    pub channel: String,
}

impl Invocation {
    /// Split `text` on whitespace and look up the leading word.
    ///
    /// Returns `None` for empty text or an unknown command word.
    #[must_use]
    pub fn parse(user: &str, channel: &str, text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let command = Command::lookup(words.next()?)?;
        Some(Self {
            command,
            args: words.map(ToString::to_string).collect(),
            user: user.to_string(),
            channel: channel.to_string(),
        })
    }

    /// Arguments as string slices
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Handle one chat message end to end.
///
/// Messages that do not start with the trigger word are ordinary chat and
/// get no reply. Otherwise the rest of the text is run as a command.
/// Returns the number of reply lines produced.
pub async fn dispatch(
    app: &App,
    user: &str,
    channel: &str,
    text: &str,
    sink: &dyn ReplySink,
) -> usize {
    let Some(command_text) = app.strip_trigger(text) else {
        debug!(user, channel, "Ignoring message without trigger word");
        return 0;
    };
    run_command(app, user, channel, command_text, sink).await
}

/// Run command text that has already been addressed to the bot.
///
/// Delivers each reply line separately, in order. A failed delivery is
/// logged and the remaining lines are still attempted.
pub async fn run_command(
    app: &App,
    user: &str,
    channel: &str,
    text: &str,
    sink: &dyn ReplySink,
) -> usize {
    let Some(invocation) = Invocation::parse(user, channel, text) else {
        debug!(user, channel, "Ignoring message with no known command");
        return 0;
    };

    info!(
        command = %invocation.command,
        user,
        channel,
        args = ?invocation.args,
        "Running command"
    );
    let lines = invocation.command.run(app, &invocation).await;

    for line in &lines {
        if let Err(e) = sink.send(channel, line).await {
            warn!(channel, error = %e, "Failed to deliver reply");
        }
    }
    lines.len()
}

/// Message sent when `take` finds every resource leased
pub const NO_SERVERS_AVAILABLE_TEXT: &str =
    "Sorry, all servers are currently taken. Check `status` to see when one frees up.";

/// Reply line for a failed command
pub(crate) fn error_reply(app: &App, user: &str, err: &CoreError) -> String {
    let trigger = &app.config().trigger_word;
    match err {
        CoreError::NoResourcesAvailable => NO_SERVERS_AVAILABLE_TEXT.to_string(),
        CoreError::InvalidDuration(detail) => {
            debug!(user, detail, "Rejected duration");
            format!(
                "Sorry, <@{user}>, I couldn't understand that duration. \
                 Try something like `{trigger} take 3 days`."
            )
        }
        CoreError::UnknownResource(name) => {
            format!("Sorry, <@{user}>, I don't know a server called {name}.")
        }
        CoreError::DeployConflict { resource, holder } => {
            format!("Sorry, <@{user}>, it looks like {holder} is already deploying to {resource}.")
        }
        CoreError::PreconditionFailed { .. } => {
            format!("Please reserve that server using {trigger} take, <@{user}>")
        }
        CoreError::InvalidConfig(_) | CoreError::Io(_) | CoreError::Parse(_) => {
            error!(user, error = %err, "Command failed");
            format!("Sorry, <@{user}>, something went wrong.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(Command::lookup("status"), Some(Command::Status));
        assert_eq!(Command::lookup("INFO"), Some(Command::Status));
        assert_eq!(Command::lookup("List"), Some(Command::Status));
        assert_eq!(Command::lookup("take"), Some(Command::Take));
        assert_eq!(Command::lookup("deploy"), Some(Command::Deploy));
        assert_eq!(Command::lookup("release"), None);
    }

    #[test]
    fn test_parse_invocation() {
        let invocation = Invocation::parse("kevin", "general", "take  sassy 3 days");
        assert_eq!(
            invocation,
            Some(Invocation {
                command: Command::Take,
                args: vec!["sassy".into(), "3".into(), "days".into()],
                user: "kevin".into(),
                channel: "general".into(),
            })
        );
    }

    #[test]
    fn test_parse_ignores_unknown_and_empty() {
        assert!(Invocation::parse("kevin", "general", "lunch anyone?").is_none());
        assert!(Invocation::parse("kevin", "general", "   ").is_none());
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Status.to_string(), "status");
        assert_eq!(Command::Deploy.to_string(), "deploy");
    }
}
