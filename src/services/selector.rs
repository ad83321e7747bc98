//! 分层随机选题 - 业务能力层
//!
//! 按难度分桶、按配额随机抽取，配额不足时从剩余题目中补齐。
//! 只读取传入的题目池，不修改它。

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use crate::error::SelectionError;
use crate::models::question::{Difficulty, Distribution, Filter, Question};

/// 各难度的目标题数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quotas {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Quotas {
    /// 计算配额
    ///
    /// 简单和中等按百分比四舍五入，困难取余数，因此困难的实际占比
    /// 可能偏离其百分比。百分比之和超过 100 时依次截断，保证三者之和
    /// 恰好等于 `quantity`。
    pub fn compute(quantity: usize, distribution: &Distribution) -> Self {
        let d = distribution.sanitized();
        let share = |pct: f64| ((quantity as f64) * pct / 100.0).round() as usize;

        let easy = share(d.facil).min(quantity);
        let medium = share(d.medio).min(quantity - easy);
        let hard = quantity - easy - medium;

        Self { easy, medium, hard }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

/// 选题结果
///
/// ID 唯一，按抽取顺序保存：简单、中等、困难、补充
#[derive(Debug, Clone)]
pub struct Selection {
    ids: Vec<String>,
    seen: HashSet<String>,
    pub quotas: Quotas,
    pub from_easy: usize,
    pub from_medium: usize,
    pub from_hard: usize,
    pub backfilled: usize,
}

impl Selection {
    fn new(quotas: Quotas) -> Self {
        Self {
            ids: Vec::new(),
            seen: HashSet::new(),
            quotas,
            from_easy: 0,
            from_medium: 0,
            from_hard: 0,
            backfilled: 0,
        }
    }

    fn insert(&mut self, id: &str) -> bool {
        if self.seen.insert(id.to_string()) {
            self.ids.push(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id_set(&self) -> HashSet<String> {
        self.seen.clone()
    }

    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// 使用线程随机数生成器选题
pub fn select(
    pool: &[Question],
    filter: &Filter,
    quantity: usize,
    distribution: &Distribution,
) -> Result<Selection, SelectionError> {
    let mut rng = rand::thread_rng();
    select_with_rng(pool, filter, quantity, distribution, &mut rng)
}

/// 分层随机选题
///
/// # 参数
/// - `pool`: 候选题目池
/// - `filter`: 科目/年级筛选
/// - `quantity`: 目标题数
/// - `distribution`: 难度分布百分比
/// - `rng`: 随机数生成器
///
/// # 返回
/// 过滤后题目池为空时返回 `NoMatchingQuestions`；题目不足时返回的结果
/// 可能少于 `quantity`，这不算错误
pub fn select_with_rng<R: Rng + ?Sized>(
    pool: &[Question],
    filter: &Filter,
    quantity: usize,
    distribution: &Distribution,
    rng: &mut R,
) -> Result<Selection, SelectionError> {
    let candidates: Vec<&Question> = pool.iter().filter(|q| filter.matches(q)).collect();
    if candidates.is_empty() {
        return Err(SelectionError::NoMatchingQuestions {
            subject: filter.subject.clone(),
            grade: filter.grade.clone(),
        });
    }

    let mut easy = Vec::new();
    let mut medium = Vec::new();
    let mut hard = Vec::new();
    for q in &candidates {
        match q.difficulty() {
            Some(Difficulty::Easy) => easy.push(*q),
            Some(Difficulty::Medium) => medium.push(*q),
            Some(Difficulty::Hard) => hard.push(*q),
            None => {}
        }
    }

    let quotas = Quotas::compute(quantity, distribution);
    debug!(
        "候选 {} 道 (简单 {} / 中等 {} / 困难 {}), 配额 {:?}",
        candidates.len(),
        easy.len(),
        medium.len(),
        hard.len(),
        quotas
    );

    let mut selection = Selection::new(quotas);
    let from_easy = draw(&mut easy, quotas.easy, rng, &mut selection);
    let from_medium = draw(&mut medium, quotas.medium, rng, &mut selection);
    let from_hard = draw(&mut hard, quotas.hard, rng, &mut selection);
    selection.from_easy = from_easy;
    selection.from_medium = from_medium;
    selection.from_hard = from_hard;

    if selection.len() < quantity {
        let mut rest: Vec<&Question> = candidates
            .iter()
            .copied()
            .filter(|q| !selection.contains(&q.id))
            .collect();
        rest.shuffle(rng);

        for q in rest {
            if selection.len() >= quantity {
                break;
            }
            if selection.insert(&q.id) {
                selection.backfilled += 1;
            }
        }
        debug!("补充 {} 道题目", selection.backfilled);
    }

    Ok(selection)
}

/// 打乱桶内题目后取前 `quota` 道，返回实际加入的数量
fn draw<R: Rng + ?Sized>(
    bucket: &mut [&Question],
    quota: usize,
    rng: &mut R,
    selection: &mut Selection,
) -> usize {
    bucket.shuffle(rng);
    bucket
        .iter()
        .take(quota)
        .filter(|q| selection.insert(&q.id))
        .count()
}
