//! 本地存储 - 基础设施层
//!
//! 只负责"读写个人题目"的能力，不认识业务流程

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::error::{AppResult, StorageError};
use crate::models::question::Question;

/// 个人题目存储
pub trait QuestionStore {
    /// 读取全部个人题目
    fn load(&self) -> AppResult<Vec<Question>>;

    /// 覆盖保存全部个人题目
    fn save(&self, questions: &[Question]) -> AppResult<()>;
}

/// JSON 文件存储
///
/// 文件不存在时视为空题库；写入时先写临时文件再重命名
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl QuestionStore for JsonFileStore {
    fn load(&self) -> AppResult<Vec<Question>> {
        if !self.path.exists() {
            debug!("存储文件不存在，返回空题库: {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::ReadFailed {
            path: self.path_string(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let questions: Vec<Question> =
            serde_json::from_str(&content).map_err(|source| StorageError::JsonParseFailed {
                path: self.path_string(),
                source,
            })?;

        debug!("从 {} 读取 {} 道个人题目", self.path.display(), questions.len());
        Ok(questions)
    }

    fn save(&self, questions: &[Question]) -> AppResult<()> {
        let json =
            serde_json::to_string_pretty(questions).map_err(|source| StorageError::JsonParseFailed {
                path: self.path_string(),
                source,
            })?;

        let write_failed = |source| StorageError::WriteFailed {
            path: self.path_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_failed)?;
        fs::rename(&tmp, &self.path).map_err(write_failed)?;

        debug!("已保存 {} 道个人题目到 {}", questions.len(), self.path.display());
        Ok(())
    }
}

/// 内存存储（测试和试运行用）
#[derive(Default)]
pub struct MemoryStore {
    questions: Mutex<Vec<Question>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Mutex::new(questions),
        }
    }

    /// 当前保存的内容快照
    pub fn snapshot(&self) -> Vec<Question> {
        self.questions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl QuestionStore for MemoryStore {
    fn load(&self) -> AppResult<Vec<Question>> {
        Ok(self.snapshot())
    }

    fn save(&self, questions: &[Question]) -> AppResult<()> {
        *self
            .questions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = questions.to_vec();
        Ok(())
    }
}
