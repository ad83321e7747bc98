//! # Banco de Questões
//!
//! 题库管理与自动组卷
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - 个人题目的本地存储（`QuestionStore`）
//! - `clients/` - 社区题库远程客户端（`CommunityPublisher`）
//!
//! ### ② 业务能力层（Services）
//! - `Selector` - 按难度分层随机选题，配额不足时补齐
//! - `QuestionBank` - 系统题目 + 个人题目的增删改查与分享
//!
//! ### ③ 流程层（Workflow）
//! - `ExamFlow` - 一次组卷：取题目池 → 选题 → 组装试卷
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/exam_runner` - 应用初始化、按配置组卷、输出试卷
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CommunityPublisher, FirebaseClient};
pub use config::Config;
pub use error::{AppError, AppResult, SelectionError};
pub use infrastructure::{JsonFileStore, MemoryStore, QuestionStore};
pub use models::{Difficulty, Distribution, Exam, ExamRequest, Filter, PublicQuestion, Question};
pub use orchestrator::App;
pub use services::{select, select_with_rng, QuestionBank, Selection};
pub use workflow::ExamFlow;
