//! Remote todo store backed by a Supabase (PostgREST) table.

use async_trait::async_trait;
use entities::{Todo, TodoPatch};
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::{normalize::parse_created_at, TodoStore, TodoStoreError, TodoStoreResult};

/// Table that holds the todos on the remote side.
const TABLE: &str = "todos";

/// Document shape returned by the remote backend.
#[derive(Debug, Deserialize)]
struct RemoteTodoRow {
    id: i64,
    task: String,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RemoteTodoRow> for Todo {
    fn from(row: RemoteTodoRow) -> Self {
        Todo {
            id: row.id,
            task: row.task,
            completed: row.completed.unwrap_or(false),
            created_at: parse_created_at(row.created_at.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertBody<'a> {
    task: &'a str,
    completed: bool,
}

#[derive(Debug, Serialize)]
struct PatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

/// Todo store that talks to a hosted PostgREST endpoint.
pub struct RemoteTodoStore {
    /// Full URL of the todos table endpoint
    table_url: String,
    /// Access credential sent as `apikey` and bearer token
    api_key: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl RemoteTodoStore {
    /// Creates a new remote store for the project at `base_url`.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_client(base_url, api_key, reqwest::Client::new())
    }

    /// Creates a new remote store using the given HTTP client.
    pub fn with_client(base_url: &str, api_key: &str, http_client: reqwest::Client) -> Self {
        Self {
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), TABLE),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// Returns the endpoint all requests go to.
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http_client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends a request and decodes the returned array of rows.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> TodoStoreResult<Vec<T>> {
        debug!(operation, url = %self.table_url, "Calling remote todo backend");

        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-success response into [`TodoStoreError::Remote`].
async fn check_status(response: Response) -> TodoStoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(TodoStoreError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn id_filter(id: i64) -> String {
    format!("eq.{id}")
}

#[async_trait]
impl TodoStore for RemoteTodoStore {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>> {
        let request = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc,id.desc")]);

        let rows: Vec<RemoteTodoRow> = self.fetch_rows("list", request).await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>> {
        let request = self
            .request(Method::GET)
            .query(&[("select", "*".to_string()), ("id", id_filter(id))]);

        let rows: Vec<RemoteTodoRow> = self.fetch_rows("get", request).await?;
        Ok(rows.into_iter().next().map(Todo::from))
    }

    async fn create_todo(&self, task: &str) -> TodoStoreResult<Todo> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&InsertBody {
                task,
                completed: false,
            });

        let rows: Vec<RemoteTodoRow> = self.fetch_rows("create", request).await?;
        rows.into_iter()
            .next()
            .map(Todo::from)
            .ok_or_else(|| TodoStoreError::empty_response("create"))
    }

    async fn update_todo(&self, id: i64, patch: &TodoPatch) -> TodoStoreResult<Option<Todo>> {
        if patch.is_empty() {
            return self.get_todo(id).await;
        }

        // An empty representation means the filter matched no row
        let request = self
            .request(Method::PATCH)
            .query(&[("id", id_filter(id))])
            .header("Prefer", "return=representation")
            .json(&PatchBody {
                task: patch.task.as_deref(),
                completed: patch.completed,
            });

        let rows: Vec<RemoteTodoRow> = self.fetch_rows("update", request).await?;
        Ok(rows.into_iter().next().map(Todo::from))
    }

    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()> {
        debug!(operation = "delete", id, "Calling remote todo backend");

        let request = self.request(Method::DELETE).query(&[("id", id_filter(id))]);
        check_status(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const KEY: &str = "test-anon-key";

    fn row(id: i64, task: &str, completed: bool) -> serde_json::Value {
        json!({
            "id": id,
            "task": task,
            "completed": completed,
            "created_at": "2024-06-01T12:00:00.123456+00:00",
        })
    }

    async fn store_for(server: &MockServer) -> RemoteTodoStore {
        RemoteTodoStore::with_client(&format!("{}/", server.uri()), KEY, reqwest::Client::new())
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = RemoteTodoStore::new("https://example.supabase.co/", KEY);
        assert_eq!(store.table_url(), "https://example.supabase.co/rest/v1/todos");
    }

    #[tokio::test]
    async fn test_list_sends_credentials_and_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .and(header("apikey", KEY))
            .and(header("authorization", format!("Bearer {KEY}").as_str()))
            .and(query_param("order", "created_at.desc,id.desc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([row(2, "second", true), row(1, "first", false)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let todos = store_for(&server).await.list_todos().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].id, 2);
        assert!(todos[0].completed);
        assert_eq!(todos[1].task, "first");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let todos = store_for(&server).await.list_todos().await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_normalized_record() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/todos"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!({"task": "Buy milk", "completed": false})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([row(
                5, "Buy milk", false
            )])))
            .expect(1)
            .mount(&server)
            .await;

        let todo = store_for(&server).await.create_todo("Buy milk").await.unwrap();
        assert_eq!(todo.id, 5);
        assert_eq!(todo.task, "Buy milk");
        assert!(!todo.completed);
    }

    #[tokio::test]
    async fn test_create_without_data_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/todos"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = store_for(&server).await.create_todo("x").await.unwrap_err();
        assert!(matches!(
            err,
            TodoStoreError::EmptyResponse {
                operation: "create"
            }
        ));
    }

    #[tokio::test]
    async fn test_update_sends_only_present_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/todos"))
            .and(query_param("id", "eq.3"))
            .and(body_json(json!({"completed": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(3, "walk", true)])))
            .expect(1)
            .mount(&server)
            .await;

        let todo = store_for(&server)
            .await
            .update_todo(3, &TodoPatch::new().with_completed(true))
            .await
            .unwrap()
            .unwrap();
        assert!(todo.completed);
        assert_eq!(todo.task, "walk");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/todos"))
            .and(query_param("id", "eq.404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = store_for(&server)
            .await
            .update_todo(404, &TodoPatch::new().with_task("nope"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_null_or_missing_completed_reads_as_false() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "task": "null flag", "completed": null, "created_at": null},
                {"id": 1, "task": "no flag"},
            ])))
            .mount(&server)
            .await;

        let todos = store_for(&server).await.list_todos().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert!(todos.iter().all(|t| !t.completed));
        assert_eq!(todos[0].task, "null flag");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .and(query_param("id", "eq.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(8, "read", false)])))
            .mount(&server)
            .await;

        let todo = store_for(&server).await.get_todo(8).await.unwrap().unwrap();
        assert_eq!(todo.task, "read");
    }

    #[tokio::test]
    async fn test_delete_hits_filtered_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/todos"))
            .and(query_param("id", "eq.11"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server).await.delete_todo(11).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let err = store_for(&server).await.list_todos().await.unwrap_err();
        match err {
            TodoStoreError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
