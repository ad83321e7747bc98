/// 社区题库客户端
///
/// 封装与远程文档库（Firebase Realtime Database REST 接口）相关的调用逻辑
use crate::config::Config;
use crate::error::{AppResult, RemoteError};
use crate::models::public::PublicQuestion;
use reqwest::{Client, Response, Url};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info};

/// 社区题库发布能力
pub trait CommunityPublisher {
    /// 发布公开题目，返回远程记录 ID
    fn publish(&self, question: &PublicQuestion) -> impl Future<Output = AppResult<String>> + Send;

    /// 撤回公开题目
    fn unpublish(&self, id: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// 列出社区中的全部公开题目
    fn list(&self) -> impl Future<Output = AppResult<Vec<PublicQuestion>>> + Send;
}

/// Firebase 客户端
pub struct FirebaseClient {
    http: Client,
    base_url: String,
    token: String,
    collection: String,
}

impl FirebaseClient {
    /// 创建新的社区题库客户端
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(
            &config.community_base_url,
            &config.community_token,
            &config.community_collection,
        )
    }

    pub fn with_endpoint(base_url: &str, token: &str, collection: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            collection: collection.trim_matches('/').to_string(),
        }
    }

    /// 集合地址
    pub fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.collection)
    }

    /// 单条记录地址
    ///
    /// ID 作为单个路径段编码，`/`、`#`、`?` 等不会改变请求的资源
    pub fn document_url(&self, id: &str) -> String {
        let collection = format!("{}/{}", self.base_url, self.collection);
        let segment = format!("{}.json", id);
        match Url::parse(&collection) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(&segment);
                }
                url.to_string()
            }
            Err(_) => format!("{}/{}", collection, segment),
        }
    }

    fn auth_query(&self) -> Vec<(&'static str, &str)> {
        if self.token.is_empty() {
            Vec::new()
        } else {
            vec![("auth", self.token.as_str())]
        }
    }

    /// 非 2xx 响应转换为错误
    async fn check_status(endpoint: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        }
        .into())
    }
}

impl CommunityPublisher for FirebaseClient {
    async fn publish(&self, question: &PublicQuestion) -> AppResult<String> {
        let url = self.document_url(&question.id);
        debug!("发布题目 Payload: {:?}", question);

        let response = self
            .http
            .put(&url)
            .query(&self.auth_query())
            .json(question)
            .send()
            .await
            .map_err(|e| crate::error::AppError::request_failed(&url, e))?;
        Self::check_status(&url, response).await?;

        info!("✓ 题目已发布到社区: {}", question.id);
        Ok(question.id.clone())
    }

    async fn unpublish(&self, id: &str) -> AppResult<()> {
        let url = self.document_url(id);

        let response = self
            .http
            .delete(&url)
            .query(&self.auth_query())
            .send()
            .await
            .map_err(|e| crate::error::AppError::request_failed(&url, e))?;
        Self::check_status(&url, response).await?;

        info!("✓ 已从社区撤回题目: {}", id);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<PublicQuestion>> {
        let url = self.collection_url();

        let response = self
            .http
            .get(&url)
            .query(&self.auth_query())
            .send()
            .await
            .map_err(|e| crate::error::AppError::request_failed(&url, e))?;
        let response = Self::check_status(&url, response).await?;

        // 空集合时返回 null
        let records: Option<HashMap<String, PublicQuestion>> =
            response
                .json()
                .await
                .map_err(|source| RemoteError::JsonParseFailed {
                    endpoint: url.clone(),
                    source,
                })?;

        let mut questions: Vec<PublicQuestion> =
            records.map(|m| m.into_values().collect()).unwrap_or_default();
        questions.sort_by(|a, b| b.publicada_em.cmp(&a.publicada_em));

        debug!("社区题库共 {} 道题目", questions.len());
        Ok(questions)
    }
}
