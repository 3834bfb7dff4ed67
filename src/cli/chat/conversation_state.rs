use serde::Serialize;

/// Opening line of every session.
pub const GREETING: &str = "您好！我是智播农链的AI客服小助手，很高兴为您服务！请问有什么可以帮助您的吗？";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Append-only transcript of a single chat session.
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn add_user_message(&mut self, message: &str) {
        self.push(Role::User, message);
    }

    pub fn add_assistant_message(&mut self, message: &str) {
        self.push(Role::Assistant, message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ends the session: everything but the greeting is dropped.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn push(&mut self, role: Role, content: &str) {
        self.messages.push(ChatMessage {
            role,
            content: content.to_string(),
        });
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}
