//! 组卷流程 - 流程层
//!
//! 流程顺序：
//! 1. 从题库取题目池
//! 2. 分层随机选题
//! 3. 按选题顺序组装试卷

use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::QuestionStore;
use crate::models::exam::{Exam, ExamRequest};
use crate::models::question::Question;
use crate::services::question_bank::QuestionBank;
use crate::services::selector::{select_with_rng, Selection};
use crate::utils::logging::log_selection;
use crate::utils::text::generate_id;

/// 组卷流程
pub struct ExamFlow {
    verbose_logging: bool,
}

impl ExamFlow {
    pub fn new(verbose_logging: bool) -> Self {
        Self { verbose_logging }
    }

    /// 生成试卷
    ///
    /// 题目池为空时返回选题错误；题目不足时生成不完整的试卷并记录警告
    pub fn generate<S, R>(
        &self,
        bank: &QuestionBank<S>,
        request: &ExamRequest,
        rng: &mut R,
    ) -> AppResult<Exam>
    where
        S: QuestionStore,
        R: Rng + ?Sized,
    {
        let pool = bank.pool();
        info!(
            "🔍 正在组卷: {} (题目池 {} 道, 需要 {} 道)",
            request.titulo,
            pool.len(),
            request.quantidade
        );

        let selection = select_with_rng(
            &pool,
            &request.filtro,
            request.quantidade,
            &request.distribuicao,
            rng,
        )?;

        log_selection(&selection, request.quantidade);
        if selection.len() < request.quantidade {
            warn!(
                "⚠️ 题目池不足，只选出 {}/{} 道题目",
                selection.len(),
                request.quantidade
            );
        }

        let questoes = materialize(pool, &selection);
        if self.verbose_logging {
            for (i, q) in questoes.iter().enumerate() {
                info!(
                    "  {}. [{}] {}",
                    i + 1,
                    q.difficulty().map_or("?", |d| d.name()),
                    crate::utils::logging::truncate_text(&q.enunciado, 60)
                );
            }
        }

        Ok(Exam {
            id: generate_id(),
            titulo: request.titulo.clone(),
            criado_em: Utc::now(),
            filtro: request.filtro.clone(),
            distribuicao: request.distribuicao,
            solicitadas: request.quantidade,
            questoes,
        })
    }
}

/// 按选题顺序取出题目
fn materialize(pool: Vec<Question>, selection: &Selection) -> Vec<Question> {
    let mut by_id: HashMap<String, Question> = HashMap::with_capacity(pool.len());
    for q in pool {
        by_id.entry(q.id.clone()).or_insert(q);
    }
    selection
        .ids()
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, SelectionError};
    use crate::infrastructure::MemoryStore;
    use crate::models::question::{Distribution, Filter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(n: usize) -> QuestionBank<MemoryStore> {
        let system = (0..n)
            .map(|i| Question {
                id: format!("q{}", i),
                disciplina: "Ciências".to_string(),
                ano: "6".to_string(),
                dificuldade: (i % 4) as u8,
                enunciado: format!("Pergunta {}", i),
                resposta: Some("A".to_string()),
                ..Default::default()
            })
            .collect();
        QuestionBank::open(system, MemoryStore::new()).unwrap()
    }

    fn request(quantidade: usize, subject: Option<&str>) -> ExamRequest {
        ExamRequest {
            titulo: "Prova bimestral".to_string(),
            filtro: Filter::new(subject.map(String::from), None),
            quantidade,
            distribuicao: Distribution::new(50.0, 30.0, 20.0),
        }
    }

    #[test]
    fn generates_exam_in_selection_order() {
        let bank = bank(40);
        let mut rng = StdRng::seed_from_u64(1);
        let exam = ExamFlow::new(true)
            .generate(&bank, &request(10, Some("Ciências")), &mut rng)
            .unwrap();

        assert_eq!(exam.questoes.len(), 10);
        assert!(exam.is_complete());
        assert_eq!(exam.answer_key().len(), 10);
        assert_eq!(exam.answer_key()[0], (1, Some("A")));

        // 与直接选题的顺序一致
        let selection = select_with_rng(
            &bank.pool(),
            &Filter::new(Some("Ciências".to_string()), None),
            10,
            &Distribution::new(50.0, 30.0, 20.0),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let ids: Vec<&str> = exam.questoes.iter().map(|q| q.id.as_str()).collect();
        let expected: Vec<&str> = selection.ids().iter().map(String::as_str).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn short_pool_gives_incomplete_exam() {
        let bank = bank(4);
        let mut rng = StdRng::seed_from_u64(2);
        let exam = ExamFlow::new(false)
            .generate(&bank, &request(10, None), &mut rng)
            .unwrap();
        assert_eq!(exam.questoes.len(), 4);
        assert!(!exam.is_complete());
    }

    #[test]
    fn unmatched_filter_propagates_selection_error() {
        let bank = bank(4);
        let mut rng = StdRng::seed_from_u64(3);
        let err = ExamFlow::new(false)
            .generate(&bank, &request(5, Some("Artes")), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Selection(SelectionError::NoMatchingQuestions { .. })
        ));
    }
}
