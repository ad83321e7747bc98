use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::{Distribution, Filter, Question};

/// 组卷请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRequest {
    pub titulo: String,
    #[serde(default)]
    pub filtro: Filter,
    pub quantidade: usize,
    #[serde(default)]
    pub distribuicao: Distribution,
}

/// 生成的试卷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub titulo: String,
    pub criado_em: DateTime<Utc>,
    pub filtro: Filter,
    pub distribuicao: Distribution,
    /// 请求的题目数量
    pub solicitadas: usize,
    pub questoes: Vec<Question>,
}

impl Exam {
    /// 是否凑够了请求的数量
    pub fn is_complete(&self) -> bool {
        self.questoes.len() >= self.solicitadas
    }

    /// 答案表：(题号, 答案)，题号从 1 开始
    pub fn answer_key(&self) -> Vec<(usize, Option<&str>)> {
        self.questoes
            .iter()
            .enumerate()
            .map(|(i, q)| (i + 1, q.resposta.as_deref()))
            .collect()
    }
}
