//! Parsing context threaded through every conversion.
//!
//! This module provides the [`ErrorTemplate`] type: the location conversion is
//! currently looking at, plus the ambient facts (which operation, which side
//! sent the document) that change which members are required. Templates are
//! immutable; descending into a member or element produces a new one.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::source::{ErrorSource, Segment};

/// The operation a document was sent for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    Create,
    Delete,
    #[default]
    Fetch,
    Update,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Delete => "delete",
            Action::Fetch => "fetch",
            Action::Update => "update",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "delete" => Ok(Action::Delete),
            "fetch" => Ok(Action::Fetch),
            "update" => Ok(Action::Update),
            other => Err(ContextError::UnknownAction(other.to_string())),
        }
    }
}

/// The side of the exchange that produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sender {
    Client,
    #[default]
    Server,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Client => "client",
            Sender::Server => "server",
        }
    }
}

impl Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Sender::Client),
            "server" => Ok(Sender::Server),
            other => Err(ContextError::UnknownSender(other.to_string())),
        }
    }
}

/// Errors from reading an action or sender name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("unknown action '{0}', expected one of create, delete, fetch, update")]
    UnknownAction(String),

    #[error("unknown sender '{0}', expected client or server")]
    UnknownSender(String),
}

/// The prototype every [`ValidationError`](crate::ValidationError) is built
/// from during conversion.
///
/// A template is created once per top-level parse and passed by reference
/// down the call tree. [`descend`](ErrorTemplate::descend) returns a fresh
/// template pointing one level deeper; the parent is never touched.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::{Action, ErrorTemplate, Sender};
///
/// let template = ErrorTemplate::new(Action::Create, Sender::Client);
/// let data = template.descend("data");
///
/// assert_eq!(template.source().pointer(), Some(""));
/// assert_eq!(data.source().pointer(), Some("/data"));
/// assert_eq!(data.action(), Action::Create);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorTemplate {
    source: ErrorSource,
    action: Action,
    sender: Sender,
}

impl ErrorTemplate {
    /// Creates a template at the document root.
    pub fn new(action: Action, sender: Sender) -> Self {
        Self {
            source: ErrorSource::root(),
            action,
            sender,
        }
    }

    /// Sets the action and returns self for chaining.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Sets the sender and returns self for chaining.
    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = sender;
        self
    }

    /// Sets the location and returns self for chaining.
    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = source;
        self
    }

    /// Returns a template one member or element deeper.
    pub fn descend(&self, segment: impl Into<Segment>) -> Self {
        Self {
            source: self.source.descend(segment),
            action: self.action,
            sender: self.sender,
        }
    }

    pub fn source(&self) -> &ErrorSource {
        &self.source
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// The current pointer, or `""` for non-pointer sources.
    pub(crate) fn pointer(&self) -> &str {
        self.source.pointer().unwrap_or("")
    }

    /// Resource `id` may only be omitted by a client creating a resource.
    pub fn requires_resource_id(&self) -> bool {
        !(self.action == Action::Create && self.sender == Sender::Client)
    }
}

impl Default for ErrorTemplate {
    fn default() -> Self {
        Self::new(Action::default(), Sender::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = ErrorTemplate::default();
        assert_eq!(template.action(), Action::Fetch);
        assert_eq!(template.sender(), Sender::Server);
        assert_eq!(template.source(), &ErrorSource::root());
    }

    #[test]
    fn test_descend_keeps_context() {
        let template = ErrorTemplate::new(Action::Update, Sender::Client);
        let deeper = template.descend("data").descend(2);
        assert_eq!(deeper.action(), Action::Update);
        assert_eq!(deeper.sender(), Sender::Client);
        assert_eq!(deeper.pointer(), "/data/2");
        assert_eq!(template.pointer(), "");
    }

    #[test]
    fn test_resource_id_requirement() {
        assert!(!ErrorTemplate::new(Action::Create, Sender::Client).requires_resource_id());
        assert!(ErrorTemplate::new(Action::Create, Sender::Server).requires_resource_id());
        assert!(ErrorTemplate::new(Action::Update, Sender::Client).requires_resource_id());
        assert!(ErrorTemplate::new(Action::Fetch, Sender::Server).requires_resource_id());
    }

    #[test]
    fn test_parse_action_and_sender() {
        assert_eq!("create".parse::<Action>(), Ok(Action::Create));
        assert_eq!("client".parse::<Sender>(), Ok(Sender::Client));
        assert_eq!(
            "upsert".parse::<Action>(),
            Err(ContextError::UnknownAction("upsert".to_string()))
        );
        assert!("browser".parse::<Sender>().is_err());
    }

    #[test]
    fn test_builder() {
        let template = ErrorTemplate::default()
            .with_action(Action::Delete)
            .with_sender(Sender::Client)
            .with_source(ErrorSource::pointer_at("/data"));
        assert_eq!(template.action(), Action::Delete);
        assert_eq!(template.sender(), Sender::Client);
        assert_eq!(template.pointer(), "/data");
    }
}
