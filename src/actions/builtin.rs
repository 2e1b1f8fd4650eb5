//! Handlers available to declarative catalog files

use super::action::ActionHandler;
use super::arguments::ArgumentList;

/// Returns its arguments joined by a separator
#[derive(Debug, Clone)]
pub struct EchoHandler {
    separator: String,
}

impl Default for EchoHandler {
    fn default() -> Self {
        Self::new(" ")
    }
}

impl EchoHandler {
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl ActionHandler for EchoHandler {
    fn execute(&self, args: &ArgumentList) -> anyhow::Result<String> {
        Ok(args.as_slice().join(&self.separator))
    }
}

/// Returns a fixed string regardless of arguments
#[derive(Debug, Clone)]
pub struct StaticHandler {
    output: String,
}

impl StaticHandler {
    #[must_use]
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl ActionHandler for StaticHandler {
    fn execute(&self, _args: &ArgumentList) -> anyhow::Result<String> {
        Ok(self.output.clone())
    }
}
