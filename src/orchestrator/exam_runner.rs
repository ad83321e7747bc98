//! 组卷运行器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、加载系统题目、打开个人题库
//! 2. **组卷**：按配置生成试卷（委托 `ExamFlow`）
//! 3. **输出**：写出试卷文件和统计信息
//!
//! 不处理选题细节，只做调度和统计。

use crate::clients::FirebaseClient;
use crate::config::Config;
use crate::infrastructure::JsonFileStore;
use crate::models::exam::Exam;
use crate::models::loaders::load_all_question_files;
use crate::services::QuestionBank;
use crate::utils::logging::{
    append_log_line, init_log_file, log_bank_loaded, log_startup, print_final_stats,
};
use crate::workflow::ExamFlow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    bank: QuestionBank<JsonFileStore>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(&config.questions_folder, &config.storage_path);

        // 加载系统题目
        info!("\n📁 正在扫描系统题目...");
        let system = if Path::new(&config.questions_folder).exists() {
            load_all_question_files(&config.questions_folder).await?
        } else {
            warn!("⚠️ 系统题目目录不存在: {}", config.questions_folder);
            Vec::new()
        };

        // 打开个人题库
        let store = JsonFileStore::new(&config.storage_path);
        let bank = QuestionBank::open(system, store).context("无法读取个人题目")?;
        log_bank_loaded(bank.system().len(), bank.personal().len());

        Ok(Self { config, bank })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank<JsonFileStore> {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut QuestionBank<JsonFileStore> {
        &mut self.bank
    }

    /// 按配置创建社区题库客户端
    pub fn community_client(&self) -> FirebaseClient {
        FirebaseClient::new(&self.config)
    }

    /// 运行应用主逻辑：按配置组卷并写出试卷文件
    pub async fn run(&self) -> Result<Exam> {
        if self.bank.is_empty() {
            warn!("⚠️ 题目池为空，无法组卷");
        }

        let request = self.config.exam_request();
        let exam = {
            let mut rng = rand::thread_rng();
            ExamFlow::new(self.config.verbose_logging).generate(&self.bank, &request, &mut rng)?
        };

        self.write_exam(&exam).await?;

        append_log_line(
            &self.config.output_log_file,
            &format!(
                "试卷 {} | {} | {}/{} 道题目",
                exam.id,
                exam.titulo,
                exam.questoes.len(),
                exam.solicitadas
            ),
        )?;
        print_final_stats(&exam, &self.config.output_path, &self.config.output_log_file);

        Ok(exam)
    }

    async fn write_exam(&self, exam: &Exam) -> Result<()> {
        let json = serde_json::to_string_pretty(exam)?;
        let path = Path::new(&self.config.output_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("无法写入试卷文件: {}", self.config.output_path))?;
        Ok(())
    }
}
