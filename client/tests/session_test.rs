//! Integration tests for the session against canned HTTP responses.
//!
//! Each test binds a loopback listener that answers every connection with
//! one fixed response, so the remote client's status handling and the
//! session's state transitions are exercised without a real backend.

use shutter_client::{ApiClient, Capability, Session, TombstoneStore};
use shutter_core::{EntityKind, NewAlbum};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_state_path(name: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "shutter-session-test-{}-{}-{}.json",
        std::process::id(),
        n,
        name
    ))
}

struct Cleanup(PathBuf);
impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Serve every incoming connection the same response until the test ends.
/// Returns the base URL to point the client at.
async fn serve(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                // Read the request head; the exact bytes don't matter here.
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     content-type: application/json\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{addr}")
}

async fn session_against(
    base_url: String,
    capability: Capability,
    state_name: &str,
) -> (Session, Cleanup) {
    let path = temp_state_path(state_name);
    let cleanup = Cleanup(path.clone());
    let tombstones = TombstoneStore::open(&path).unwrap();
    let api = ApiClient::new(base_url.parse().unwrap());
    (Session::new(api, capability, tombstones), cleanup)
}

#[tokio::test]
async fn successful_album_fetch_populates_state() {
    let base = serve(
        "200 OK",
        r#"[{"id":1,"userId":7,"title":"Vacation"},{"id":2,"userId":7,"title":"Pets"}]"#,
    )
    .await;
    let (mut session, _cleanup) = session_against(base, Capability::read_only(), "fetch-ok").await;

    session.load_albums(7).await;

    assert!(!session.albums().is_loading());
    assert!(session.albums().error().is_none());
    assert_eq!(
        session
            .albums()
            .items()
            .iter()
            .map(|a| a.id)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[tokio::test]
async fn failed_album_fetch_sets_display_message() {
    let base = serve("500 Internal Server Error", "{}").await;
    let (mut session, _cleanup) = session_against(base, Capability::read_only(), "fetch-err").await;

    session.load_albums(7).await;

    assert!(!session.albums().is_loading());
    assert_eq!(session.albums().error(), Some("Failed to fetch albums"));
    assert!(session.albums().items().is_empty());
}

#[tokio::test]
async fn create_album_404_surfaces_fixed_message_and_leaves_state() {
    let base = serve("404 Not Found", "{}").await;
    let (mut session, _cleanup) = session_against(base, Capability::manager(), "create-404").await;

    let result = session.create_album(NewAlbum::new(7, "Vacation")).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create album");
    assert!(session.albums().items().is_empty());
}

#[tokio::test]
async fn created_album_is_appended_to_state() {
    let base = serve("201 Created", r#"{"id":101,"userId":7,"title":"Vacation"}"#).await;
    let (mut session, _cleanup) = session_against(base, Capability::manager(), "create-ok").await;

    let created = session
        .create_album(NewAlbum::new(7, "Vacation"))
        .await
        .unwrap();

    assert_eq!(created.id, 101);
    assert_eq!(session.visible_albums().len(), 1);
}

#[tokio::test]
async fn delete_album_records_tombstone_and_hides_it() {
    let base = serve("200 OK", "").await;
    let (mut session, _cleanup) = session_against(base, Capability::manager(), "delete").await;

    // Simulate a previous listing the delete acts on.
    session.add_local_album(NewAlbum::new(7, "Keep")).unwrap();
    let doomed = session.add_local_album(NewAlbum::new(7, "Doomed")).unwrap();

    session.delete_album(doomed.id).await.unwrap();

    assert!(session.tombstones().is_deleted(EntityKind::Album, doomed.id));
    let visible = session.visible_albums();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Keep");
    // The underlying record is never removed, only filtered.
    assert_eq!(session.albums().items().len(), 2);
}

#[tokio::test]
async fn read_only_session_is_refused_before_any_network_call() {
    // Deliberately unroutable: a Forbidden check must fire first.
    let (mut session, _cleanup) = session_against(
        "http://127.0.0.1:1".to_string(),
        Capability::read_only(),
        "forbidden",
    )
    .await;

    let err = session
        .create_album(NewAlbum::new(7, "Vacation"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "management actions are not permitted for this session"
    );

    let err = session.delete_album(1).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "management actions are not permitted for this session"
    );
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let (mut session, _cleanup) = session_against(
        "http://127.0.0.1:1".to_string(),
        Capability::manager(),
        "validation",
    )
    .await;

    let err = session.create_album(NewAlbum::new(7, "   ")).await.unwrap_err();
    assert_eq!(err.to_string(), "missing required field: title");
    assert!(session.albums().items().is_empty());
}

#[tokio::test]
async fn refetch_after_delete_still_hides_tombstoned_album() {
    let base = serve(
        "200 OK",
        r#"[{"id":1,"userId":7,"title":"One"},{"id":2,"userId":7,"title":"Two"}]"#,
    )
    .await;
    let path = temp_state_path("refetch");
    let _cleanup = Cleanup(path.clone());

    // Pre-record the tombstone the way a previous session would have.
    {
        let mut tombstones = TombstoneStore::open(&path).unwrap();
        tombstones.record(EntityKind::Album, 2).unwrap();
    }

    let tombstones = TombstoneStore::open(&path).unwrap();
    let api = ApiClient::new(base.parse().unwrap());
    let mut session = Session::new(api, Capability::read_only(), tombstones);

    session.load_albums(7).await;

    // The mock backend still returns album 2; the tombstone hides it.
    assert_eq!(session.albums().items().len(), 2);
    let visible = session.visible_albums();
    assert_eq!(visible.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
}
