use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

use crate::models::Exam;
use crate::services::selector::Selection;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n组卷日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(questions_folder: &str, storage_path: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库组卷模式");
    info!("📁 系统题目目录: {}", questions_folder);
    info!("💾 个人题目文件: {}", storage_path);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
///
/// # 参数
/// - `system`: 系统题目数量
/// - `personal`: 个人题目数量
pub fn log_bank_loaded(system: usize, personal: usize) {
    info!("✓ 已加载 {} 道系统题目", system);
    info!("✓ 已加载 {} 道个人题目", personal);
    info!("📋 题目池共 {} 道\n", system + personal);
}

/// 记录选题结果
pub fn log_selection(selection: &Selection, requested: usize) {
    let quotas = selection.quotas;
    info!("\n{}", "─".repeat(60));
    info!(
        "🎯 配额: 简单 {} / 中等 {} / 困难 {}",
        quotas.easy, quotas.medium, quotas.hard
    );
    info!(
        "✓ 抽取: 简单 {} / 中等 {} / 困难 {} / 补充 {}",
        selection.from_easy, selection.from_medium, selection.from_hard, selection.backfilled
    );
    info!("📄 共选出 {}/{} 道题目", selection.len(), requested);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `exam`: 生成的试卷
/// - `output_path`: 试卷输出路径
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(exam: &Exam, output_path: &str, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 组卷完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📝 试卷: {}", exam.titulo);
    if exam.is_complete() {
        info!("✅ 题目数: {}/{}", exam.questoes.len(), exam.solicitadas);
    } else {
        info!(
            "⚠️ 题目数: {}/{} (题目池不足)",
            exam.questoes.len(),
            exam.solicitadas
        );
    }
    info!("{}", "=".repeat(60));
    info!("\n试卷已保存至: {}", output_path);
    info!("日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
