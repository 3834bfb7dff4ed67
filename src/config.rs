use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::faq::KnowledgeBase;

/// Environment variable naming a knowledge base JSON file.
pub const KNOWLEDGE_BASE_ENV: &str = "AGRI_FAQ_KB";

const CONFIG_DIR_NAME: &str = "agri-faq-chat";
const CONFIG_FILE_NAME: &str = "faq.json";

/// Where the knowledge base for this session comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeBaseSource {
    /// Passed with `--knowledge-base`.
    Flag(PathBuf),
    /// Named by [`KNOWLEDGE_BASE_ENV`].
    Env(PathBuf),
    /// Found in the user's config directory.
    ConfigDir(PathBuf),
    Builtin,
}

impl KnowledgeBaseSource {
    /// Resolve the source from the command line, the environment and the
    /// user config directory, in that order.
    pub fn resolve(flag: Option<&str>) -> Self {
        let env_value = env::var(KNOWLEDGE_BASE_ENV).ok();
        let config_dir = dirs::config_dir();
        resolve_from(flag, env_value.as_deref(), config_dir.as_deref())
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Env(path) | Self::ConfigDir(path) => Some(path),
            Self::Builtin => None,
        }
    }

    pub fn load(&self) -> Result<KnowledgeBase> {
        match self.path() {
            Some(path) => KnowledgeBase::load(path),
            None => Ok(KnowledgeBase::builtin()),
        }
    }
}

impl fmt::Display for KnowledgeBaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (--knowledge-base)", path.display()),
            Self::Env(path) => write!(f, "{} (${})", path.display(), KNOWLEDGE_BASE_ENV),
            Self::ConfigDir(path) => write!(f, "{} (config directory)", path.display()),
            Self::Builtin => write!(f, "built-in"),
        }
    }
}

fn resolve_from(
    flag: Option<&str>,
    env_value: Option<&str>,
    config_dir: Option<&Path>,
) -> KnowledgeBaseSource {
    if let Some(path) = flag.filter(|p| !p.trim().is_empty()) {
        return KnowledgeBaseSource::Flag(sanitize_path(path));
    }

    if let Some(path) = env_value.filter(|p| !p.trim().is_empty()) {
        return KnowledgeBaseSource::Env(sanitize_path(path));
    }

    if let Some(dir) = config_dir {
        let candidate = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return KnowledgeBaseSource::ConfigDir(candidate);
        }
    }

    KnowledgeBaseSource::Builtin
}

/// Expand a leading `~` and make relative paths absolute against the
/// current directory.
pub fn sanitize_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path_buf = Path::new(path);
    if path_buf.is_relative() {
        if let Ok(current_dir) = env::current_dir() {
            return current_dir.join(path_buf);
        }
    }

    path_buf.to_path_buf()
}
