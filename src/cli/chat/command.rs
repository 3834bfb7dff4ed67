/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Clear,
    /// List the quick questions.
    Faq,
    /// Show the knowledge base grouped by category.
    KnowledgeBase,
    History,
    /// `#N`: pick quick question N (1-based).
    QuickQuestion(usize),
    Unknown(String),
    Ask(String),
}

impl Command {
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let command = match input {
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            "/clear" => Self::Clear,
            "/faq" => Self::Faq,
            "/kb" => Self::KnowledgeBase,
            "/history" => Self::History,
            _ if input.starts_with('/') => Self::Unknown(input.to_string()),
            _ => match input.strip_prefix('#').map(|n| n.trim().parse::<usize>()) {
                Some(Ok(number)) => Self::QuickQuestion(number),
                _ => Self::Ask(input.to_string()),
            },
        };

        Some(command)
    }
}
