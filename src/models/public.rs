use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::Question;
use crate::utils::text::escape_html;

/// 社区题库中的公开题目
///
/// 只保留内容字段，本地标记（来源、分享状态）不上传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub origem_id: String,
    pub disciplina: String,
    pub ano: String,
    pub dificuldade: u8,
    pub enunciado: String,
    #[serde(default)]
    pub alternativas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resposta: Option<String>,
    pub autor: String,
    pub publicada_em: DateTime<Utc>,
}

impl PublicQuestion {
    /// 将个人题目规范化为公开记录，文本字段做 HTML 转义
    pub fn from_question(question: &Question, author: &str) -> Self {
        Self {
            id: question.id.clone(),
            origem_id: question.id.clone(),
            disciplina: question.disciplina.trim().to_string(),
            ano: question.ano.trim().to_string(),
            dificuldade: question.dificuldade,
            enunciado: escape_html(question.enunciado.trim()),
            alternativas: question
                .alternativas
                .iter()
                .map(|a| escape_html(a.trim()))
                .collect(),
            resposta: question.resposta.as_deref().map(|r| escape_html(r.trim())),
            autor: author.trim().to_string(),
            publicada_em: Utc::now(),
        }
    }
}
