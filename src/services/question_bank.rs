//! 题库服务 - 业务能力层
//!
//! 管理系统题目（只读）和教师个人题目（增删改、持久化、分享）

use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

use crate::clients::CommunityPublisher;
use crate::error::{AppError, AppResult, BankError};
use crate::infrastructure::QuestionStore;
use crate::models::public::PublicQuestion;
use crate::models::question::{Difficulty, Filter, Origin, Question};
use crate::utils::text::{generate_id, normalize};

/// 题库
pub struct QuestionBank<S: QuestionStore> {
    system: Vec<Question>,
    personal: Vec<Question>,
    store: S,
}

impl<S: QuestionStore> QuestionBank<S> {
    /// 创建题库并从存储中读取个人题目
    pub fn open(system: Vec<Question>, store: S) -> AppResult<Self> {
        let mut personal = store.load()?;
        for q in &mut personal {
            q.origem = Origin::Pessoal;
        }
        Ok(Self {
            system,
            personal,
            store,
        })
    }

    pub fn system(&self) -> &[Question] {
        &self.system
    }

    pub fn personal(&self) -> &[Question] {
        &self.personal
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 完整题目池：系统题目在前，个人题目在后
    pub fn pool(&self) -> Vec<Question> {
        self.system
            .iter()
            .chain(self.personal.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.personal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按 ID 查找题目（先个人后系统）
    pub fn find(&self, id: &str) -> Option<&Question> {
        self.personal
            .iter()
            .chain(self.system.iter())
            .find(|q| q.id == id)
    }

    /// 保存个人题目
    ///
    /// ID 为空时生成新 ID；ID 已存在时原地替换。返回题目 ID
    pub fn save(&mut self, mut question: Question) -> AppResult<String> {
        validate(&question)?;

        if question.id.trim().is_empty() {
            question.id = generate_id();
        }
        if self.system.iter().any(|q| q.id == question.id) {
            return Err(BankError::ReadOnly { id: question.id }.into());
        }

        question.origem = Origin::Pessoal;
        if question.criada_em.is_none() {
            question.criada_em = Some(Utc::now());
        }

        let id = question.id.clone();
        match self.personal.iter_mut().find(|q| q.id == id) {
            Some(existing) => {
                // 分享状态由 share/unshare 维护
                question.compartilhada = existing.compartilhada;
                if question.compartilhada {
                    warn!("⚠️ 已分享的题目被修改，社区中的副本需要重新分享: {}", id);
                }
                *existing = question;
                info!("✓ 已更新个人题目: {}", id);
            }
            None => {
                question.compartilhada = false;
                self.personal.push(question);
                info!("✓ 已新增个人题目: {}", id);
            }
        }

        self.persist()?;
        Ok(id)
    }

    /// 删除个人题目，返回被删除的题目
    pub fn delete(&mut self, id: &str) -> AppResult<Question> {
        let Some(pos) = self.personal.iter().position(|q| q.id == id) else {
            if self.system.iter().any(|q| q.id == id) {
                return Err(BankError::ReadOnly { id: id.to_string() }.into());
            }
            return Err(AppError::not_found(id));
        };

        let removed = self.personal.remove(pos);
        if removed.compartilhada {
            warn!("⚠️ 删除的题目仍在社区题库中: {}", id);
        }
        self.persist()?;
        info!("✓ 已删除个人题目: {}", id);
        Ok(removed)
    }

    /// 检索题目：题干、科目、年级，忽略大小写和变音符号
    pub fn search(&self, query: &str) -> Vec<&Question> {
        let needle = normalize(query);
        if needle.is_empty() {
            return self.system.iter().chain(self.personal.iter()).collect();
        }
        self.system
            .iter()
            .chain(self.personal.iter())
            .filter(|q| {
                normalize(&q.enunciado).contains(&needle)
                    || normalize(&q.disciplina).contains(&needle)
                    || normalize(&q.ano) == needle
            })
            .collect()
    }

    /// 所有科目（去重排序）
    pub fn subjects(&self) -> Vec<String> {
        self.distinct(|q| &q.disciplina)
    }

    /// 所有年级（去重排序）
    pub fn grades(&self) -> Vec<String> {
        self.distinct(|q| &q.ano)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Question) -> &String,
    {
        self.system
            .iter()
            .chain(self.personal.iter())
            .map(field)
            .filter(|v| !v.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 符合筛选条件的各难度题目数
    pub fn counts_by_difficulty(&self, filter: &Filter) -> HashMap<Difficulty, usize> {
        let mut counts = HashMap::new();
        for q in self
            .system
            .iter()
            .chain(self.personal.iter())
            .filter(|q| filter.matches(q))
        {
            if let Some(d) = q.difficulty() {
                *counts.entry(d).or_insert(0) += 1;
            }
        }
        counts
    }

    /// 分享个人题目到社区题库
    ///
    /// 发布失败时本地状态不变
    pub async fn share<P: CommunityPublisher>(
        &mut self,
        id: &str,
        author: &str,
        publisher: &P,
    ) -> AppResult<String> {
        let question = self.personal_mut(id)?;
        let public = PublicQuestion::from_question(question, author);

        let remote_id = publisher.publish(&public).await?;

        let question = self.personal_mut(id)?;
        question.compartilhada = true;
        if question.autor.is_none() && !author.trim().is_empty() {
            question.autor = Some(author.trim().to_string());
        }
        self.persist()?;
        Ok(remote_id)
    }

    /// 从社区题库撤回
    pub async fn unshare<P: CommunityPublisher>(&mut self, id: &str, publisher: &P) -> AppResult<()> {
        self.personal_mut(id)?;
        publisher.unpublish(id).await?;

        self.personal_mut(id)?.compartilhada = false;
        self.persist()
    }

    fn personal_mut(&mut self, id: &str) -> AppResult<&mut Question> {
        if let Some(pos) = self.personal.iter().position(|q| q.id == id) {
            return Ok(&mut self.personal[pos]);
        }
        if self.system.iter().any(|q| q.id == id) {
            return Err(BankError::ReadOnly { id: id.to_string() }.into());
        }
        Err(AppError::not_found(id))
    }

    fn persist(&self) -> AppResult<()> {
        self.store.save(&self.personal)
    }
}

/// 远程文档库键中不允许出现的字符
const FORBIDDEN_ID_CHARS: [char; 6] = ['/', '.', '#', '$', '[', ']'];

fn validate(question: &Question) -> AppResult<()> {
    if let Some(bad) = question
        .id
        .chars()
        .find(|c| FORBIDDEN_ID_CHARS.contains(c) || c.is_control())
    {
        return Err(AppError::validation(
            "id",
            format!("包含非法字符 {:?}", bad),
        ));
    }
    if question.enunciado.trim().is_empty() {
        return Err(AppError::validation("enunciado", "不能为空"));
    }
    if question.disciplina.trim().is_empty() {
        return Err(AppError::validation("disciplina", "不能为空"));
    }
    if Difficulty::from_code(question.dificuldade).is_none() {
        return Err(AppError::validation(
            "dificuldade",
            format!("未知难度代码 {}", question.dificuldade),
        ));
    }
    Ok(())
}
