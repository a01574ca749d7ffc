use std::fmt;

use crate::serial::{SerializedRuleSet, SCRIPT_TYPE};
use crate::sink::{PublishError, RuleSink};

/// A node in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    Title(String),
    Meta { name: String, content: String },
    Script { kind: String, text: String },
}

/// In-memory model of a page's head, used to attach rule sets when rendering
/// pages on the server.
///
/// At most one speculation rules block is attached; a second
/// [`publish`](RuleSink::publish) is refused with
/// [`PublishError::AlreadyAttached`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    head: Vec<HeadNode>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.head.push(HeadNode::Title(title.to_owned()));
        self
    }

    #[must_use]
    pub fn meta(mut self, name: &str, content: &str) -> Self {
        self.head.push(HeadNode::Meta {
            name: name.to_owned(),
            content: content.to_owned(),
        });
        self
    }

    /// Append a node to the head.
    pub fn append(&mut self, node: HeadNode) {
        self.head.push(node);
    }

    #[must_use]
    pub fn head(&self) -> &[HeadNode] {
        &self.head
    }

    /// Text of every attached speculation rules script, in head order.
    pub fn speculation_rules(&self) -> impl Iterator<Item = &str> {
        self.head.iter().filter_map(|node| match node {
            HeadNode::Script { kind, text } if kind == SCRIPT_TYPE => Some(text.as_str()),
            _ => None,
        })
    }

    /// Render the head as HTML.
    #[must_use]
    pub fn render_head(&self) -> String {
        let mut out = String::from("<head>");
        for node in &self.head {
            out.push_str(&node.to_string());
        }
        out.push_str("</head>");
        out
    }
}

/// Renders the node as HTML. Script text never closes its element early.
impl fmt::Display for HeadNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadNode::Title(title) => write!(f, "<title>{}</title>", escape_text(title)),
            HeadNode::Meta { name, content } => write!(
                f,
                "<meta name=\"{}\" content=\"{}\">",
                escape_attr(name),
                escape_attr(content)
            ),
            HeadNode::Script { kind, text } => write!(
                f,
                "<script type=\"{}\">{}</script>",
                escape_attr(kind),
                text.replace("</", "<\\/")
            ),
        }
    }
}

impl RuleSink for Document {
    fn publish(&mut self, rules: SerializedRuleSet) -> Result<(), PublishError> {
        if self.speculation_rules().next().is_some() {
            return Err(PublishError::AlreadyAttached);
        }
        self.head.push(HeadNode::Script {
            kind: SCRIPT_TYPE.to_owned(),
            text: rules.script_text(),
        });
        Ok(())
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
