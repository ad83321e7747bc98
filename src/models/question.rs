use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 题目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// 系统内置题目（只读）
    #[default]
    Sistema,
    /// 教师自建题目
    Pessoal,
}

/// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: String,
    /// 科目
    #[serde(default)]
    pub disciplina: String,
    /// 年级
    #[serde(default, deserialize_with = "deserialize_grade")]
    pub ano: String,
    /// 难度代码: 0/1 = 简单, 2 = 中等, 3 = 困难
    #[serde(default)]
    pub dificuldade: u8,
    /// 题干
    #[serde(default)]
    pub enunciado: String,
    #[serde(default)]
    pub alternativas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resposta: Option<String>,
    #[serde(default)]
    pub origem: Origin,
    #[serde(default)]
    pub compartilhada: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criada_em: Option<DateTime<Utc>>,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            id: String::new(),
            disciplina: String::new(),
            ano: String::new(),
            dificuldade: 0,
            enunciado: String::new(),
            alternativas: Vec::new(),
            resposta: None,
            origem: Origin::Sistema,
            compartilhada: false,
            autor: None,
            criada_em: None,
        }
    }
}

impl Question {
    /// 难度档位，未知代码返回 None
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_code(self.dificuldade)
    }

    pub fn is_system(&self) -> bool {
        self.origem == Origin::Sistema
    }
}

// 年级既可能写成字符串也可能写成整数
fn deserialize_grade<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct GradeVisitor;

    impl<'de> Visitor<'de> for GradeVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a grade")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(GradeVisitor)
}

/// 难度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单
    Easy,
    /// 中等
    Medium,
    /// 困难
    Hard,
}

impl Difficulty {
    /// 从难度代码解析档位
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 | 1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "facil",
            Difficulty::Medium => "medio",
            Difficulty::Hard => "dificil",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题目筛选条件，未设置的字段匹配所有题目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Filter {
    pub fn new(subject: Option<String>, grade: Option<String>) -> Self {
        Self { subject, grade }
    }

    pub fn matches(&self, question: &Question) -> bool {
        let subject_ok = self
            .subject
            .as_deref()
            .map_or(true, |s| question.disciplina == s);
        let grade_ok = self.grade.as_deref().map_or(true, |g| question.ano == g);
        subject_ok && grade_ok
    }
}

/// 难度分布（百分比）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub facil: f64,
    pub medio: f64,
    pub dificil: f64,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            facil: 40.0,
            medio: 40.0,
            dificil: 20.0,
        }
    }
}

impl Distribution {
    pub fn new(facil: f64, medio: f64, dificil: f64) -> Self {
        Self {
            facil,
            medio,
            dificil,
        }
    }

    /// 负数和非有限值归零
    pub fn sanitized(self) -> Self {
        fn clean(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }
        Self {
            facil: clean(self.facil),
            medio: clean(self.medio),
            dificil: clean(self.dificil),
        }
    }

    /// 解析 "50,30,20" 形式的分布
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match parts.as_slice() {
            [facil, medio, dificil] => Some(Self::new(*facil, *medio, *dificil)),
            _ => None,
        }
    }
}
