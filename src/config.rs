use crate::models::exam::ExamRequest;
use crate::models::question::{Distribution, Filter};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 系统题目文件目录
    pub questions_folder: String,
    /// 个人题目存储文件
    pub storage_path: String,
    /// 试卷输出文件
    pub output_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 社区题库配置 ---
    pub community_base_url: String,
    pub community_token: String,
    pub community_collection: String,
    pub author_name: String,
    // --- 组卷配置 ---
    pub exam_title: String,
    pub exam_subject: Option<String>,
    pub exam_grade: Option<String>,
    pub exam_quantity: usize,
    pub exam_distribution: Distribution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_folder: "questoes".to_string(),
            storage_path: "dados/questoes_pessoais.json".to_string(),
            output_path: "prova.json".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            community_base_url: "https://banco-questoes-default-rtdb.firebaseio.com".to_string(),
            community_token: String::new(),
            community_collection: "questoes_comunidade".to_string(),
            author_name: "Professor".to_string(),
            exam_title: "Avaliação".to_string(),
            exam_subject: None,
            exam_grade: None,
            exam_quantity: 10,
            exam_distribution: Distribution::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            questions_folder: std::env::var("QUESTIONS_FOLDER").unwrap_or(default.questions_folder),
            storage_path: std::env::var("STORAGE_PATH").unwrap_or(default.storage_path),
            output_path: std::env::var("OUTPUT_PATH").unwrap_or(default.output_path),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            community_base_url: std::env::var("COMMUNITY_BASE_URL").unwrap_or(default.community_base_url),
            community_token: std::env::var("COMMUNITY_TOKEN").unwrap_or(default.community_token),
            community_collection: std::env::var("COMMUNITY_COLLECTION").unwrap_or(default.community_collection),
            author_name: std::env::var("AUTHOR_NAME").unwrap_or(default.author_name),
            exam_title: std::env::var("EXAM_TITLE").unwrap_or(default.exam_title),
            exam_subject: non_empty_var("EXAM_SUBJECT").or(default.exam_subject),
            exam_grade: non_empty_var("EXAM_GRADE").or(default.exam_grade),
            exam_quantity: std::env::var("EXAM_QUANTITY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.exam_quantity),
            exam_distribution: std::env::var("EXAM_DISTRIBUTION").ok().and_then(|v| Distribution::parse(&v)).unwrap_or(default.exam_distribution),
        }
    }

    /// 由配置生成组卷请求
    pub fn exam_request(&self) -> ExamRequest {
        ExamRequest {
            titulo: self.exam_title.clone(),
            filtro: Filter::new(self.exam_subject.clone(), self.exam_grade.clone()),
            quantidade: self.exam_quantity,
            distribuicao: self.exam_distribution,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
