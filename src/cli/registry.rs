use std::collections::HashMap;

use async_trait::async_trait;

use crate::app::{GatorError, Result, Session};

/// A command name plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Fail with [`GatorError::InvalidArgCount`] unless exactly `expected`
    /// arguments were given.
    pub fn expect_args(&self, expected: usize) -> Result<()> {
        if self.args.len() != expected {
            return Err(GatorError::InvalidArgCount {
                command: self.name.clone(),
                expected,
                got: self.args.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()>;
}

/// Maps command names to their handlers.
#[derive(Default)]
pub struct Commands {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register<H>(&mut self, name: &str, handler: H)
    where
        H: CommandHandler + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up and invoke the handler for `command`.
    ///
    /// Handler failures are logged in full and then wrapped in
    /// [`GatorError::CommandFailed`].
    pub async fn run(&self, session: &mut Session, command: &Command) -> Result<()> {
        let handler = self
            .handlers
            .get(&command.name)
            .ok_or_else(|| GatorError::UnknownCommand(command.name.clone()))?;

        tracing::debug!("Running {} with {} args", command.name, command.args.len());

        handler.handle(session, command).await.map_err(|e| {
            tracing::error!("{} failed: {}", command.name, e);
            GatorError::CommandFailed {
                command: command.name.clone(),
                source: Box::new(e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::test_support::session;

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl CommandHandler for Counting {
        async fn handle(&self, _session: &mut Session, _command: &Command) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl CommandHandler for Failing {
        async fn handle(&self, _session: &mut Session, command: &Command) -> Result<()> {
            Err(GatorError::UserNotFound(command.args.join(" ")))
        }
    }

    #[test]
    fn test_expect_args() {
        let command = Command::new("login", vec!["alice".into()]);
        assert!(command.expect_args(1).is_ok());

        let err = command.expect_args(0).unwrap_err();
        assert!(matches!(
            err,
            GatorError::InvalidArgCount { expected: 0, got: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_run_invokes_registered_handler() {
        let (mut session, _dir) = session();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut commands = Commands::new();
        commands.register("count", Counting(calls.clone()));

        commands
            .run(&mut session, &Command::new("count", vec![]))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (mut session, _dir) = session();
        let commands = Commands::new();

        let err = commands
            .run(&mut session, &Command::new("nope", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatorError::UnknownCommand(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_handler_errors_are_wrapped() {
        let (mut session, _dir) = session();
        let mut commands = Commands::new();
        commands.register("fail", Failing);

        let err = commands
            .run(&mut session, &Command::new("fail", vec!["ghost".into()]))
            .await
            .unwrap_err();

        match err {
            GatorError::CommandFailed { command, source } => {
                assert_eq!(command, "fail");
                assert!(matches!(source.as_ref(), GatorError::UserNotFound(name) if name == "ghost"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_overwrites() {
        let (mut session, _dir) = session();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut commands = Commands::new();
        commands.register("same", Failing);
        commands.register("same", Counting(calls.clone()));

        commands
            .run(&mut session, &Command::new("same", vec![]))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(commands.names(), vec!["same"]);
    }
}
