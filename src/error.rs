use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 组卷选题错误
    #[error("选题错误: {0}")]
    Selection(#[from] SelectionError),
    /// 题库操作错误
    #[error("题库错误: {0}")]
    Bank(#[from] BankError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 远程社区题库错误
    #[error("远程错误: {0}")]
    Remote(#[from] RemoteError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 组卷选题错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// 按筛选条件过滤后题目池为空
    #[error("没有符合条件的题目 (科目: {}, 年级: {})", .subject.as_deref().unwrap_or("全部"), .grade.as_deref().unwrap_or("全部"))]
    NoMatchingQuestions {
        subject: Option<String>,
        grade: Option<String>,
    },
}

/// 题库操作错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    /// 题目不存在
    #[error("题目不存在: {id}")]
    NotFound { id: String },
    /// 系统题目只读
    #[error("系统题目不可修改: {id}")]
    ReadOnly { id: String },
    /// 题目字段校验失败
    #[error("题目校验失败: 字段 {field} {reason}")]
    Validation { field: &'static str, reason: String },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 远程社区题库错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 远程返回错误响应
    #[error("远程返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建题目不存在错误
    pub fn not_found(id: impl Into<String>) -> Self {
        AppError::Bank(BankError::NotFound { id: id.into() })
    }

    /// 创建字段校验错误
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Bank(BankError::Validation {
            field,
            reason: reason.into(),
        })
    }

    /// 创建远程请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Remote(RemoteError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matching_questions_message_names_filter() {
        let err = SelectionError::NoMatchingQuestions {
            subject: Some("Matemática".to_string()),
            grade: None,
        };
        assert_eq!(
            err.to_string(),
            "没有符合条件的题目 (科目: Matemática, 年级: 全部)"
        );
    }

    #[test]
    fn selection_error_converts_into_app_error() {
        let err: AppError = SelectionError::NoMatchingQuestions {
            subject: None,
            grade: None,
        }
        .into();
        assert!(matches!(err, AppError::Selection(_)));
    }
}
