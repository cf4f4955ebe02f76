use anyhow::Context;
use async_trait::async_trait;
use domain::{InsertOutcome, PersistedComment, StoredComment};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::traits::CommentStore;

#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

/// Writes rows through the PostgREST endpoint of a Supabase project.
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        // 每个请求都带上 apikey 与 Bearer 凭证
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).context("Store API key is not a valid header")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("Store API key is not a valid header")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=representation"));

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.table
        );
        info!("Comment store endpoint: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    fn build_insert(&self, record: &PersistedComment) -> reqwest::Result<reqwest::Request> {
        self.client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&[record])
            .build()
    }
}

#[async_trait]
impl CommentStore for SupabaseStore {
    async fn insert(&self, record: &PersistedComment) -> InsertOutcome {
        let result = async {
            let request = self.build_insert(record)?;
            let response = self.client.execute(request).await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;

        match result {
            Ok((status, body)) => interpret_response(status, &body),
            Err(e) => {
                error!("Store request failed: {:?}", e);
                InsertOutcome::Rejected {
                    message: e.to_string(),
                }
            }
        }
    }
}

fn interpret_response(status: StatusCode, body: &str) -> InsertOutcome {
    let body = body.trim();

    if status.is_success() {
        if body.is_empty() {
            return InsertOutcome::NoData;
        }
        // 写入是否成功只看返回体的形状, 行结构不符只影响本地缓存
        let rows = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Array(rows)) => rows,
            Ok(serde_json::Value::Null) => return InsertOutcome::NoData,
            Ok(row) => vec![row],
            Err(e) => {
                return InsertOutcome::Rejected {
                    message: format!("Unreadable store response: {}", e),
                }
            }
        };
        if rows.is_empty() {
            return InsertOutcome::NoData;
        }
        return InsertOutcome::Inserted(cacheable_rows(rows));
    }

    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => err.message,
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string()),
    };
    error!("Store rejected insert ({}): {}", status, message);
    InsertOutcome::Rejected { message }
}

/// Keeps the returned rows that carry an id and the full record shape.
fn cacheable_rows(rows: Vec<serde_json::Value>) -> Vec<StoredComment> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<StoredComment>(row) {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!("Inserted row kept out of the local cache: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::Category;

    fn store() -> SupabaseStore {
        SupabaseStore::new(SupabaseConfig {
            url: "https://demo.supabase.co/".into(),
            api_key: "anon-key".into(),
            table: "comments".into(),
        })
        .unwrap()
    }

    fn record() -> PersistedComment {
        PersistedComment {
            blog_writer_email: "b@x.com".into(),
            commenter_email: "a@x.com".into(),
            comment: "Great post".into(),
            name_commenter: "Ann".into(),
            category: Category::Issue,
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_request_carries_credentials_and_one_row() {
        let request = store().build_insert(&record()).unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://demo.supabase.co/rest/v1/comments"
        );
        let headers = request.headers();
        assert_eq!(headers["apikey"], "anon-key");
        assert_eq!(headers[AUTHORIZATION], "Bearer anon-key");
        assert_eq!(headers["prefer"], "return=representation");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(body).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name_commenter"], "Ann");
        assert_eq!(rows[0]["type"], "issue");
    }

    #[test]
    fn success_with_rows_is_inserted() {
        let body = serde_json::json!([{
            "id": 7,
            "blog_writer_email": "b@x.com",
            "commenter_email": "a@x.com",
            "comment": "Great post",
            "name_commenter": "Ann",
            "type": "issue",
            "image": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        }])
        .to_string();

        match interpret_response(StatusCode::CREATED, &body) {
            InsertOutcome::Inserted(rows) => assert_eq!(rows[0].id.as_str(), "7"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn rows_that_do_not_fit_the_cache_still_count_as_inserted() {
        let without_id = serde_json::json!([{
            "blog_writer_email": "b@x.com",
            "commenter_email": "a@x.com",
            "comment": "Great post",
            "name_commenter": "Ann",
            "type": "issue",
            "image": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        }])
        .to_string();
        assert_eq!(
            interpret_response(StatusCode::CREATED, &without_id),
            InsertOutcome::Inserted(vec![])
        );

        let null_column = serde_json::json!([{
            "id": 8,
            "blog_writer_email": "b@x.com",
            "commenter_email": "a@x.com",
            "comment": "Great post",
            "name_commenter": null,
            "type": "issue",
            "image": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        }])
        .to_string();
        assert_eq!(
            interpret_response(StatusCode::CREATED, &null_column),
            InsertOutcome::Inserted(vec![])
        );
        assert!(interpret_response(StatusCode::CREATED, &null_column)
            .into_result()
            .is_ok());
    }

    #[test]
    fn success_without_rows_is_no_data() {
        assert_eq!(interpret_response(StatusCode::CREATED, ""), InsertOutcome::NoData);
        assert_eq!(interpret_response(StatusCode::OK, "[]"), InsertOutcome::NoData);
        assert_eq!(interpret_response(StatusCode::OK, "null"), InsertOutcome::NoData);
    }

    #[test]
    fn failures_surface_the_store_message() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy"}"#;
        assert_eq!(
            interpret_response(StatusCode::UNAUTHORIZED, body),
            InsertOutcome::Rejected {
                message: "new row violates row-level security policy".into()
            }
        );
        assert_eq!(
            interpret_response(StatusCode::BAD_GATEWAY, ""),
            InsertOutcome::Rejected {
                message: "Bad Gateway".into()
            }
        );
    }
}
