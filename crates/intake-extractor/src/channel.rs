//! Non-interactive operator channel

use intake_domain::traits::OperatorChannel;
use intake_domain::Notice;
use std::collections::VecDeque;
use std::convert::Infallible;

/// Replays a fixed list of operator lines and records what was shown
///
/// Once the lines run out the channel reports itself closed.
///
/// ```
/// use intake_domain::traits::OperatorChannel;
/// use intake_extractor::ScriptedChannel;
///
/// let mut channel = ScriptedChannel::new(["03207673078"]);
/// assert_eq!(channel.prompt("Phone: ").unwrap().as_deref(), Some("03207673078"));
/// assert_eq!(channel.prompt("Phone: ").unwrap(), None);
/// assert_eq!(channel.prompts(), ["Phone: ", "Phone: "]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedChannel {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    notices: Vec<Notice>,
}

impl ScriptedChannel {
    /// Create a channel that will answer prompts with `lines`, in order
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Notices shown so far
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl OperatorChannel for ScriptedChannel {
    type Error = Infallible;

    fn prompt(&mut self, message: &str) -> Result<Option<String>, Self::Error> {
        self.prompts.push(message.to_string());
        Ok(self.lines.pop_front())
    }

    fn notice(&mut self, notice: &Notice) -> Result<(), Self::Error> {
        self.notices.push(notice.clone());
        Ok(())
    }
}
