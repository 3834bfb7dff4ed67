pub mod command;
pub mod conversation_state;
pub mod platform;
pub mod prompt;

use std::io::Write;
use std::ops::ControlFlow;
use std::process::ExitCode;

use color_print::cformat;
use command::Command;
use conversation_state::{ChatHistory, ChatMessage, Role};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use eyre::{bail, Result};
use platform::PLATFORM;
use prompt::generate_prompt;
use rustyline::error::ReadlineError;
use tracing::{debug, error, info};

use crate::config::KnowledgeBaseSource;
use crate::faq::KnowledgeBase;

const WELCOME_TEXT: &str = "
常见问题可直接提问，例如：阜平大枣的保质期是多久？

/faq          查看常见问题，输入 #编号 快速咨询
/help         显示帮助
/quit         退出
";

const HELP_TEXT: &str = "
智播农链 AI客服

/faq          列出常见问题
#N            快速咨询第 N 个常见问题
/kb           按分类查看问答库
/history      查看本次会话记录
/clear        结束当前会话并清空记录
/help         显示帮助
/quit         退出
";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    json: bool,
    history: ChatHistory,
    source: KnowledgeBaseSource,
    knowledge_base: Option<KnowledgeBase>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        json: bool,
        source: KnowledgeBaseSource,
    ) -> Self {
        // The JSON transcript is only written for one-shot input.
        let json = json && input.is_some();
        Self {
            output,
            input,
            interactive,
            json,
            history: ChatHistory::new(),
            source,
            knowledge_base: None,
        }
    }

    pub fn run(&mut self) -> Result<ExitCode> {
        self.knowledge_base = match self.source.load() {
            Ok(kb) => {
                info!("Using {} knowledge base with {} entries", self.source, kb.len());
                Some(kb)
            }
            Err(e) => {
                error!("Failed to load knowledge base: {}", e);
                writeln!(self.output, "Failed to load knowledge base from {}: {}", self.source, e)?;
                return Ok(ExitCode::FAILURE);
            }
        };

        // Non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            let _ = self.handle_input(&input)?;
            if self.json {
                let transcript = serde_json::to_string_pretty(self.history.messages())?;
                writeln!(self.output, "{}", transcript)?;
            }
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.print_welcome()?;
            self.run_interactive()?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", PLATFORM.banner())?;
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        let greeting = self.history.messages()[0].clone();
        self.print_message(&greeting)
    }

    fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);

            match rl.readline(&prompt_text) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if self.handle_input(&line)?.is_break() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        debug!(messages = self.history.messages().len(), "Chat session ended");
        self.history.clear();
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<ControlFlow<()>> {
        let Some(command) = Command::parse(input) else {
            return Ok(ControlFlow::Continue(()));
        };

        match command {
            Command::Help => self.print(HELP_TEXT)?,
            Command::Quit => return Ok(ControlFlow::Break(())),
            Command::Clear => {
                self.history.clear();
                if self.interactive && !self.json {
                    execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
                }
                self.print("会话已清空。")?;
                let greeting = self.history.messages()[0].clone();
                self.print_message(&greeting)?;
            }
            Command::Faq => {
                let listing = self.faq_listing()?;
                self.print(&listing)?;
            }
            Command::KnowledgeBase => {
                let listing = self.knowledge_base_listing()?;
                self.print(&listing)?;
            }
            Command::History => {
                let messages = self.history.messages().to_vec();
                for message in &messages {
                    self.print_message(message)?;
                }
            }
            Command::QuickQuestion(number) => self.ask_quick_question(number)?,
            Command::Unknown(name) => {
                self.print(&format!("未知命令: {}，输入 /help 查看可用命令。", name))?;
            }
            Command::Ask(query) => self.process_chat_input(&query)?,
        }

        Ok(ControlFlow::Continue(()))
    }

    fn process_chat_input(&mut self, query: &str) -> Result<()> {
        let response = self.knowledge_base()?.respond(query).to_string();

        self.history.add_user_message(query);
        self.history.add_assistant_message(&response);
        self.display_response(&response)
    }

    /// Quick questions skip matching and answer with the stored entry directly.
    fn ask_quick_question(&mut self, number: usize) -> Result<()> {
        let entry = self.knowledge_base()?.get(number).cloned();
        let Some(entry) = entry else {
            let count = self.knowledge_base()?.len();
            return self.print(&format!("没有第 {} 个常见问题（共 {} 个）。", number, count));
        };

        debug!(number, category = %entry.category, "Quick question selected");
        self.history.add_user_message(&entry.question);
        self.history.add_assistant_message(&entry.answer);

        if self.interactive {
            let question = ChatMessage {
                role: Role::User,
                content: entry.question.clone(),
            };
            self.print_message(&question)?;
        }
        self.display_response(&entry.answer)
    }

    fn display_response(&mut self, response: &str) -> Result<()> {
        if self.interactive {
            let message = ChatMessage {
                role: Role::Assistant,
                content: response.to_string(),
            };
            self.print_message(&message)
        } else {
            self.print(response)
        }
    }

    fn faq_listing(&self) -> Result<String> {
        let kb = self.knowledge_base()?;
        if kb.is_empty() {
            return Ok("问答库为空。".to_string());
        }

        let mut listing = String::from("常见问题快速咨询（输入 #编号 提问）:\n");
        for (index, entry) in kb.entries().iter().enumerate() {
            listing.push_str(&format!("  {}. {}\n", index + 1, entry.question));
        }
        Ok(listing)
    }

    fn knowledge_base_listing(&self) -> Result<String> {
        let kb = self.knowledge_base()?;
        if kb.is_empty() {
            return Ok("问答库为空。".to_string());
        }

        let mut listing = String::new();
        for category in kb.categories() {
            listing.push_str(&format!("### {}\n", category));
            for entry in kb.by_category(category) {
                listing.push_str(&format!("  问: {}\n  答: {}\n", entry.question, entry.answer));
            }
        }
        Ok(listing)
    }

    fn print_message(&mut self, message: &ChatMessage) -> Result<()> {
        let line = match (message.role, self.interactive) {
            (Role::User, true) => cformat!("<bold><green>您:</></> {}", message.content),
            (Role::Assistant, true) => cformat!("<bold><yellow>🤖 AI客服:</></> {}", message.content),
            (Role::User, false) => format!("您: {}", message.content),
            (Role::Assistant, false) => format!("🤖 AI客服: {}", message.content),
        };
        self.print(&line)
    }

    /// Writes a line unless the transcript is going to be emitted as JSON.
    fn print(&mut self, text: &str) -> Result<()> {
        if !self.json {
            writeln!(self.output, "{}", text)?;
        }
        Ok(())
    }

    fn knowledge_base(&self) -> Result<&KnowledgeBase> {
        match &self.knowledge_base {
            Some(kb) => Ok(kb),
            None => bail!("Knowledge base not loaded"),
        }
    }
}
