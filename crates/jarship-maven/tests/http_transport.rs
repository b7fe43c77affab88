//! Exercises `HttpTransport` against a minimal in-process HTTP server.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use jarship_core::manifest::RepositoryEntry;
use jarship_core::version::VersionKind;
use jarship_maven::artifact::ArtifactAssembler;
use jarship_maven::bundle::UploadBundle;
use jarship_maven::pom::{Metadata, Scm};
use jarship_maven::publication::{Coordinates, Publication};
use jarship_maven::repository::{select_repository, RepositoryTarget};
use jarship_maven::signing::{sign_publication, Signer};
use jarship_maven::transport::{HttpTransport, Transport};
use jarship_util::errors::{JarshipError, JarshipResult};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: Vec<u8>,
}

/// Accepts connections until dropped, answering every request with `status`.
fn serve(status: &'static str) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            handle(stream, status, &sink);
        }
    });
    (format!("http://{addr}/repo"), log)
}

/// Records the request before answering so the client never observes a
/// response whose request is not yet logged.
fn handle(mut stream: TcpStream, status: &str, sink: &Mutex<Vec<Recorded>>) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "authorization" => authorization = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    sink.lock().unwrap().push(Recorded {
        method,
        path,
        authorization,
        body,
    });
    let response = format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(response.as_bytes()).ok()
}

struct EchoSigner;

impl Signer for EchoSigner {
    fn sign(&self, data: &[u8]) -> JarshipResult<Vec<u8>> {
        Ok([b"sig:".as_slice(), data].concat())
    }
}

fn target(url: &str) -> RepositoryTarget {
    let mut repos = BTreeMap::new();
    repos.insert(
        "snapshot".to_string(),
        RepositoryEntry::Detailed {
            url: url.to_string(),
            username: Some("deployer".to_string()),
            password: Some("s3cret".to_string()),
        },
    );
    select_repository(VersionKind::Snapshot, &repos).unwrap()
}

fn bundle() -> UploadBundle {
    let metadata = Metadata {
        display_name: "nbt".to_string(),
        description: String::new(),
        project_url: "https://github.com/TheNullicorn/nbt".to_string(),
        license: None,
        developers: Vec::new(),
        scm: Scm {
            url: "https://github.com/TheNullicorn/nbt/tree/main".to_string(),
            connection: "scm:git:git://github.com/TheNullicorn/nbt.git".to_string(),
            developer_connection: "scm:git:ssh://github.com/TheNullicorn/nbt.git".to_string(),
        },
    };
    let publication = Publication::new(
        Coordinates::new("me.nullicorn", "nbt", "1.0-SNAPSHOT").unwrap(),
        ArtifactAssembler::new()
            .primary(b"classes".to_vec())
            .sources(b"sources".to_vec())
            .javadoc(b"javadoc".to_vec())
            .assemble()
            .unwrap(),
        metadata,
    );
    let signatures = sign_publication(&publication, &EchoSigner).unwrap();
    let pom = publication.pom().unwrap();
    UploadBundle::new(&publication, &signatures, &pom, b"pom-sig").unwrap()
}

#[tokio::test]
async fn uploads_every_file_with_basic_auth() {
    let (url, log) = serve("201 Created");
    let bundle = bundle();
    let transport = HttpTransport::new().unwrap();

    transport.upload(&target(&url), &bundle).await.unwrap();

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), bundle.len());
    for request in &requests {
        assert_eq!(request.method, "PUT");
        assert!(request.path.starts_with("/repo/me/nullicorn/nbt/1.0-SNAPSHOT/"));
        assert_eq!(
            request.authorization.as_deref(),
            Some("Basic ZGVwbG95ZXI6czNjcmV0")
        );
    }
    let jar = requests
        .iter()
        .find(|r| r.path == "/repo/me/nullicorn/nbt/1.0-SNAPSHOT/nbt-1.0-SNAPSHOT.jar")
        .expect("primary jar uploaded");
    assert_eq!(jar.body, b"classes");
}

#[tokio::test]
async fn rejected_upload_surfaces_status() {
    let (url, log) = serve("401 Unauthorized");
    let transport = HttpTransport::new().unwrap();

    let err = transport.upload(&target(&url), &bundle()).await.unwrap_err();
    match err {
        JarshipError::Upload {
            repository,
            message,
        } => {
            assert_eq!(repository, "snapshot");
            assert!(message.contains("401"), "got: {message}");
        }
        other => panic!("expected Upload error, got {other:?}"),
    }
    // Stops at the first rejected file.
    assert_eq!(log.lock().unwrap().len(), 1);
}
