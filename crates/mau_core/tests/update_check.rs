use mau_core::update::{check_for_update, spawn_update_check, UpdateError, UpdateEvent};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

/// Serves one HTTP response on a random local port and returns its URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buffer = [0u8; 1024];
        let _ = stream.read(&mut buffer);
        let response = format!(
            "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/version.txt")
}

#[test]
fn newer_remote_version_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("version.txt");
    std::fs::write(&local, "0.0.7\n").unwrap();
    let url = serve_once("HTTP/1.1 200 OK", "v0.1.0\n");

    let status = check_for_update(&local, &url).unwrap();
    assert!(status.available);
    assert_eq!(status.local, "0.0.7");
    assert_eq!(status.remote, "v0.1.0");
}

#[test]
fn equal_version_is_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("version.txt");
    std::fs::write(&local, "v1.2.0").unwrap();
    let url = serve_once("HTTP/1.1 200 OK", "1.2");

    assert!(!check_for_update(&local, &url).unwrap().available);
}

#[test]
fn http_error_status_fails() {
    let dir = tempfile::tempdir().unwrap();
    let url = serve_once("HTTP/1.1 404 Not Found", "missing");

    let err = check_for_update(&dir.path().join("version.txt"), &url).unwrap_err();
    assert!(matches!(err, UpdateError::Status(404)));
}

#[test]
fn background_check_reports_over_channel() {
    let dir = tempfile::tempdir().unwrap();
    let url = serve_once("HTTP/1.1 200 OK", "0.0.1");

    let events = spawn_update_check(dir.path().join("version.txt"), url);
    match events.recv_timeout(Duration::from_secs(10)).unwrap() {
        UpdateEvent::Checked(status) => {
            assert_eq!(status.local, "0.0.0");
            assert!(status.available);
        }
        UpdateEvent::Failed(message) => panic!("unexpected failure: {message}"),
    }
}

#[test]
fn unreachable_server_reports_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = tempfile::tempdir().unwrap();

    let events = spawn_update_check(
        dir.path().join("version.txt"),
        format!("http://{addr}/version.txt"),
    );
    assert!(matches!(
        events.recv_timeout(Duration::from_secs(10)).unwrap(),
        UpdateEvent::Failed(_)
    ));
}
