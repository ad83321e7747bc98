//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用生命周期和组卷调度。
//!
//! ## 层次关系
//!
//! ```text
//! exam_runner (App：加载题库、组卷、输出)
//!     ↓
//! workflow::ExamFlow (一次组卷)
//!     ↓
//! services (能力层：selector / question_bank)
//!     ↓
//! infrastructure / clients (本地存储、社区题库)
//! ```

pub mod exam_runner;

pub use exam_runner::App;
