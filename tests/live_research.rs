use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use report_researcher::config::Config;
use report_researcher::llm::client::LLMClient;
use report_researcher::llm::client::utils::resolve_settings;
use report_researcher::research::executors::{
    LiveExecutor, LiveReExecutor, PromptExecutor, PromptReExecutor,
};
use report_researcher::research::generators::GeneratorRegistry;
use report_researcher::research::types::{
    GeneratorConfig, ReResearchRequest, ReportTopic, ResearchRequest,
    ResearchResultMetadataRequest,
};
use report_researcher::server::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_USER_AGENT: &str = "researcher-test-agent/1.0";

/// 上游收到的一次请求
#[derive(Debug, Clone)]
struct Captured {
    route: &'static str,
    user_agent: Option<String>,
    authorization: Option<String>,
    body: Value,
}

/// 本地模拟的LLM（OpenAI兼容）与Tavily搜索服务
#[derive(Clone)]
struct Upstream {
    planned_queries: Vec<String>,
    completion_text: String,
    search_status: StatusCode,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl Upstream {
    fn new(planned_queries: &[&str], completion_text: &str) -> Self {
        Self {
            planned_queries: planned_queries.iter().map(|q| q.to_string()).collect(),
            completion_text: completion_text.to_string(),
            search_status: StatusCode::OK,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn capture(&self, route: &'static str, headers: &HeaderMap, body: Value) {
        let header = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.captured.lock().unwrap().push(Captured {
            route,
            user_agent: header(USER_AGENT),
            authorization: header(AUTHORIZATION),
            body,
        });
    }

    fn requests(&self, route: &str) -> Vec<Captured> {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.route == route)
            .cloned()
            .collect()
    }

    async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/chat/completions", post(chat_completions))
            .route("/search", post(search))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", address)
    }
}

/// 带工具定义的请求是查询规划，按`submit`工具调用作答，其余按纯文本作答
async fn chat_completions(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    upstream.capture("llm", &headers, body.clone());

    let wants_tool = body
        .get("tools")
        .and_then(Value::as_array)
        .is_some_and(|tools| !tools.is_empty());
    let message = if wants_tool {
        let arguments = json!({ "queries": upstream.planned_queries }).to_string();
        json!({
            "role": "assistant",
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": { "name": "submit", "arguments": arguments }
            }]
        })
    } else {
        json!({ "role": "assistant", "content": upstream.completion_text })
    };

    Json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 0,
        "model": body["model"],
        "system_fingerprint": null,
        "choices": [{
            "index": 0,
            "message": message,
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "total_tokens": 20 }
    }))
}

/// 每个查询返回一条专属结果，外加一条与用户来源重复的结果
async fn search(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    upstream.capture("search", &headers, body.clone());
    if upstream.search_status != StatusCode::OK {
        return (upstream.search_status, "search backend unavailable").into_response();
    }

    let query = body["query"].as_str().unwrap_or_default();
    Json(json!({
        "query": query,
        "results": [
            {
                "title": format!("News about {}", query),
                "url": format!("https://news.example/{}", query.replace(' ', "-")),
                "content": format!("Findings for {}", query),
                "score": 0.9
            },
            {
                "title": "User report",
                "url": "https://user.example/report",
                "content": "Already known",
                "score": 0.4
            }
        ]
    }))
    .into_response()
}

fn live_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.user_agent = TEST_USER_AGENT.to_string();
    config.llm.api_base_url = Some(base_url.to_string());
    config.llm.timeout_seconds = 10;
    config.search.api_base_url = base_url.to_string();
    config.search.max_queries = 2;
    config
}

fn generator_config() -> GeneratorConfig {
    GeneratorConfig {
        dummy_api: false,
        llm_key: "llm-secret".to_string(),
        tavily_api_key: "tvly-secret".to_string(),
        llm_preset: "openai:mock-model".to_string(),
    }
}

fn market_request() -> ResearchRequest {
    ResearchRequest {
        config: generator_config(),
        report_topic: ReportTopic::MarketAnalysis,
        prompt_params: json!({
            "market": "e-bikes",
            "sources": ["https://user.example/report"]
        })
        .as_object()
        .cloned()
        .unwrap(),
        task: Value::Null,
    }
}

#[tokio::test]
async fn test_llm_requests_carry_configured_user_agent() {
    let upstream = Upstream::new(&[], "pong");
    let base_url = upstream.spawn().await;
    let config = live_config(&base_url);

    let settings = resolve_settings(&config, "llm-secret", "openai:mock-model");
    let llm = LLMClient::new(settings).unwrap();
    let reply = llm.prompt("You are terse.", "ping").await.unwrap();

    assert_eq!(reply, "pong");
    let requests = upstream.requests("llm");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user_agent.as_deref(), Some(TEST_USER_AGENT));
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer llm-secret"));
    assert_eq!(requests[0].body["model"], "mock-model");
}

#[tokio::test]
async fn test_live_research_plans_searches_and_writes_report() {
    let upstream = Upstream::new(
        &["ev market", "  ", "charging", "batteries"],
        "# E-bike market\n\nGrowing fast.",
    );
    let base_url = upstream.spawn().await;
    let executor = LiveExecutor::new(&live_config(&base_url)).unwrap();
    let request = market_request();
    let generator = GeneratorRegistry::new()
        .resolve(request.report_topic)
        .unwrap();

    let result = executor.execute(generator, &request).await.unwrap();

    assert_eq!(result.markdown, "# E-bike market\n\nGrowing fast.");
    // 用户来源在前，搜索结果按出现顺序在后并去重
    assert_eq!(
        result.metadata.source_urls,
        vec![
            "https://user.example/report",
            "https://news.example/ev-market",
            "https://news.example/charging",
        ]
    );

    // 规划出的查询被截断到max_queries
    let searches = upstream.requests("search");
    let queries: Vec<&str> = searches
        .iter()
        .map(|s| s.body["query"].as_str().unwrap())
        .collect();
    assert_eq!(queries, vec!["ev market", "charging"]);
    for search in &searches {
        assert_eq!(search.authorization.as_deref(), Some("Bearer tvly-secret"));
        assert_eq!(search.user_agent.as_deref(), Some(TEST_USER_AGENT));
    }

    let llm_calls = upstream.requests("llm");
    assert_eq!(llm_calls.len(), 2);
    for call in &llm_calls {
        assert_eq!(call.user_agent.as_deref(), Some(TEST_USER_AGENT));
        assert_eq!(call.authorization.as_deref(), Some("Bearer llm-secret"));
    }
    assert!(llm_calls[0].body["tools"].is_array());
    let writer_body = llm_calls[1].body.to_string();
    assert!(writer_body.contains("e-bikes"));
    assert!(writer_body.contains("https://news.example/charging"));
}

#[tokio::test]
async fn test_live_research_search_failure_is_server_error() {
    let mut upstream = Upstream::new(&["ev market"], "unused");
    upstream.search_status = StatusCode::BAD_GATEWAY;
    let base_url = upstream.spawn().await;
    let state = AppState::new(&live_config(&base_url)).unwrap();

    let body = json!({
        "config": {
            "dummyApi": false,
            "llmKey": "llm-secret",
            "tavilyApiKey": "tvly-secret",
            "llmPreset": "openai:mock-model"
        },
        "reportTopic": "MARKET_ANALYSIS",
        "promptParams": {},
        "task": null
    });
    let request = Request::builder()
        .method("POST")
        .uri("/research")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), 100_000)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(
        json["detail"]
            .as_str()
            .unwrap()
            .contains("Search service rejected query: ev market")
    );
    // 失败不重试，也不会继续撰写报告
    assert_eq!(upstream.requests("search").len(), 1);
    assert_eq!(upstream.requests("llm").len(), 1);
}

#[tokio::test]
async fn test_live_re_research_splices_rewrite_into_document() {
    let upstream = Upstream::new(&[], "```markdown\nplanet.\n```");
    let base_url = upstream.spawn().await;
    let executor = LiveReExecutor::new(&live_config(&base_url));
    let request = ReResearchRequest {
        config: generator_config(),
        document: "Hello world. Next".to_string(),
        metadata: ResearchResultMetadataRequest {
            source_urls: vec!["https://a.example".to_string()],
        },
        prompt: "Say planet instead".to_string(),
        selection_start: 6,
        selection_length: 7,
    };

    let result = executor.re_execute(&request).await.unwrap();

    assert_eq!(result.markdown, "Hello planet. Next");
    assert_eq!(result.metadata.source_urls, vec!["https://a.example"]);

    let llm_calls = upstream.requests("llm");
    assert_eq!(llm_calls.len(), 1);
    assert_eq!(llm_calls[0].user_agent.as_deref(), Some(TEST_USER_AGENT));
    let body = llm_calls[0].body.to_string();
    assert!(body.contains("Hello <<<SELECTION>>>world. <<<END_SELECTION>>>Next"));
    assert!(body.contains("Say planet instead"));
}
