mod common;

use banco_questoes::error::RemoteError;
use banco_questoes::{
    AppError, CommunityPublisher, FirebaseClient, MemoryStore, PublicQuestion, QuestionBank,
};
use common::{question, serve_once};

fn public(id: &str) -> PublicQuestion {
    let mut q = question(id, "Geografia", "8", 2);
    q.enunciado = "Capital do <Brasil>?".to_string();
    PublicQuestion::from_question(&q, "Prof. Lia")
}

#[tokio::test]
async fn publish_puts_document_with_auth() {
    let (base, request) = serve_once(200, r#"{"ok":true}"#).await;
    let client = FirebaseClient::with_endpoint(&base, "segredo", "questoes");

    let id = client.publish(&public("q-1")).await.unwrap();
    assert_eq!(id, "q-1");

    let raw = request.await.unwrap();
    assert!(raw.starts_with("PUT /questoes/q-1.json?auth=segredo HTTP/1.1"));
    assert!(raw.contains(r#""enunciado":"Capital do &lt;Brasil&gt;?""#));
    assert!(raw.contains(r#""autor":"Prof. Lia""#));
}

#[tokio::test]
async fn unpublish_deletes_document() {
    let (base, request) = serve_once(200, "null").await;
    let client = FirebaseClient::with_endpoint(&base, "", "questoes");

    client.unpublish("q-9").await.unwrap();

    let raw = request.await.unwrap();
    assert!(raw.starts_with("DELETE /questoes/q-9.json HTTP/1.1"));
}

#[tokio::test]
async fn unpublish_keeps_reserved_characters_inside_the_document_path() {
    let (base, request) = serve_once(200, "null").await;
    let client = FirebaseClient::with_endpoint(&base, "", "questoes");

    client.unpublish("turma/9#a").await.unwrap();

    let raw = request.await.unwrap();
    assert!(raw.starts_with("DELETE /questoes/turma%2F9%23a.json HTTP/1.1"));
}

#[tokio::test]
async fn list_reads_keyed_collection_newest_first() {
    let mut older = public("a");
    older.publicada_em = "2026-01-01T10:00:00Z".parse().unwrap();
    let mut newer = public("b");
    newer.publicada_em = "2026-03-01T10:00:00Z".parse().unwrap();
    let body = serde_json::json!({ "a": older, "b": newer }).to_string();

    let (base, _request) = serve_once(200, &body).await;
    let client = FirebaseClient::with_endpoint(&base, "", "questoes");

    let list = client.list().await.unwrap();
    let ids: Vec<&str> = list.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn empty_collection_is_null() {
    let (base, _request) = serve_once(200, "null").await;
    let client = FirebaseClient::with_endpoint(&base, "", "questoes");
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_is_bad_response() {
    let (base, _request) = serve_once(401, r#"{"error":"Permission denied"}"#).await;
    let client = FirebaseClient::with_endpoint(&base, "ruim", "questoes");

    let err = client.publish(&public("q-1")).await.unwrap_err();
    match err {
        AppError::Remote(RemoteError::BadResponse { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Permission denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_request_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FirebaseClient::with_endpoint(&format!("http://{}", addr), "", "questoes");
    let err = client.unpublish("x").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Remote(RemoteError::RequestFailed { .. })
    ));
}

#[tokio::test]
async fn share_through_firebase_client_marks_question() {
    let (base, request) = serve_once(200, "{}").await;
    let client = FirebaseClient::with_endpoint(&base, "", "questoes");

    let mut bank = QuestionBank::open(Vec::new(), MemoryStore::new()).unwrap();
    let mut draft = question("", "Artes", "5", 1);
    draft.enunciado = "Quem pintou a Mona Lisa?".to_string();
    let id = bank.save(draft).unwrap();

    bank.share(&id, "Prof. Lia", &client).await.unwrap();
    assert!(bank.find(&id).unwrap().compartilhada);

    let raw = request.await.unwrap();
    assert!(raw.starts_with(&format!("PUT /questoes/{}.json", id)));
}

#[tokio::test]
#[ignore] // 需要真实的 Firebase 地址：COMMUNITY_BASE_URL / COMMUNITY_TOKEN
async fn test_live_community_list() {
    banco_questoes::logger::init();
    let config = banco_questoes::Config::from_env();
    let client = FirebaseClient::new(&config);

    let result = client.list().await;
    assert!(result.is_ok(), "应该能够读取社区题库: {:?}", result.err());
}
