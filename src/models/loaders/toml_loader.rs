use crate::models::question::{Origin, Question};
use anyhow::{Context, Result};
use futures::future::join_all;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 系统题目文件结构
///
/// 文件级的 `disciplina` / `ano` 作为其中题目的默认值
#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    disciplina: Option<String>,
    #[serde(default)]
    ano: Option<toml::Value>,
    #[serde(default)]
    questoes: Vec<Question>,
}

/// 从单个文件加载系统题目（支持 .toml 和 .json）
pub async fn load_question_file(file_path: &Path) -> Result<Vec<Question>> {
    let content = fs::read_to_string(file_path)
        .await
        .with_context(|| format!("无法读取题目文件: {}", file_path.display()))?;

    let is_json = file_path.extension().and_then(|s| s.to_str()) == Some("json");
    let mut questions = if is_json {
        serde_json::from_str::<Vec<Question>>(&content)
            .with_context(|| format!("无法解析JSON文件: {}", file_path.display()))?
    } else {
        let file: QuestionFile = toml::from_str(&content)
            .with_context(|| format!("无法解析TOML文件: {}", file_path.display()))?;
        apply_file_defaults(file)
    };

    let stem = file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    for (idx, q) in questions.iter_mut().enumerate() {
        if q.id.is_empty() {
            q.id = format!("{}-{}", stem, idx + 1);
        }
        q.origem = Origin::Sistema;
        q.compartilhada = false;
    }

    Ok(questions)
}

fn apply_file_defaults(file: QuestionFile) -> Vec<Question> {
    let grade = file.ano.map(|v| match v {
        toml::Value::String(s) => s,
        other => other.to_string(),
    });
    file.questoes
        .into_iter()
        .map(|mut q| {
            if q.disciplina.is_empty() {
                if let Some(subject) = &file.disciplina {
                    q.disciplina = subject.clone();
                }
            }
            if q.ano.is_empty() {
                if let Some(grade) = &grade {
                    q.ano = grade.clone();
                }
            }
            q
        })
        .collect()
}

/// 从文件夹中并发加载所有题目文件
///
/// 单个文件加载失败只记录警告，不影响其他文件
pub async fn load_all_question_files(folder_path: &str) -> Result<Vec<Question>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("toml") | Some("json")
        ) {
            files.push(path);
        }
    }
    // 保证加载顺序稳定
    files.sort();

    let results = join_all(files.iter().map(|p| load_question_file(p))).await;

    let mut questions = Vec::new();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(loaded) => {
                tracing::info!(
                    "正在加载: {} ({} 道题目)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    loaded.len()
                );
                questions.extend(loaded);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(questions)
}
