use listing_viewer::{Committed, Config, HttpSource, ListingSource, LoadError, Viewer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const TWO_LISTINGS: &str = r#"[
  {"id": 1, "name": "Casa Sol", "description": "Bright house", "price": 100,
   "img": "https://img.example/1.jpg",
   "location": {"country": "Peru", "city": "Lima", "address": "Av 1"},
   "features": ["Pool"]},
  {"id": 2, "name": "Depto Luna", "description": "Quiet flat", "price": "200",
   "img": "https://img.example/2.jpg",
   "location": {"country": "Peru", "city": "Cusco", "address": "Av 2"}}
]"#;

/// Answer exactly one request; the handle yields the request line
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/properties", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (base, handle)
}

#[tokio::test]
async fn fetches_base_endpoint_without_query() {
    let (base, server) = serve_once("200 OK", TWO_LISTINGS).await;
    let source = HttpSource::new(&Config::new(base)).unwrap();

    let records = source.fetch(None).await.unwrap();

    assert_eq!(server.await.unwrap(), "GET /api/properties HTTP/1.1");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "Casa Sol");
    assert_eq!(records[1].price_text(), "200");
    assert!(records[1].features.is_empty());
}

#[tokio::test]
async fn query_goes_to_filtered_endpoint() {
    let (base, server) = serve_once("200 OK", "[]").await;
    let source = HttpSource::new(&Config::new(base)).unwrap();

    let records = source.fetch(Some("sol")).await.unwrap();

    assert_eq!(
        server.await.unwrap(),
        "GET /api/properties/filtered?name=sol HTTP/1.1"
    );
    assert!(records.is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base, server) = serve_once("500 Internal Server Error", "oops").await;
    let source = HttpSource::new(&Config::new(base)).unwrap();

    let result = source.fetch(None).await;

    server.await.unwrap();
    assert_eq!(result.unwrap_err(), LoadError::Status(500));
}

#[tokio::test]
async fn body_that_is_not_a_record_list_is_a_decode_error() {
    let (base, server) = serve_once("200 OK", r#"{"items": []}"#).await;
    let source = HttpSource::new(&Config::new(base)).unwrap();

    let result = source.fetch(None).await;

    server.await.unwrap();
    assert!(matches!(result, Err(LoadError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/properties", listener.local_addr().unwrap());
    drop(listener);
    let source = HttpSource::new(&Config::new(base)).unwrap();

    let result = source.fetch(None).await;

    assert!(matches!(result, Err(LoadError::Transport(_))));
}

#[tokio::test]
async fn viewer_surfaces_server_error() {
    let (base, server) = serve_once("500 Internal Server Error", "").await;
    let mut viewer = Viewer::new(HttpSource::new(&Config::new(base)).unwrap());

    assert_eq!(viewer.activate().await, Some(Committed::Failed));
    server.await.unwrap();

    let loader = viewer.loader();
    assert!(!loader.loading());
    assert!(loader.error().unwrap().contains("500"));
    assert!(loader.data().is_none());
}

#[tokio::test]
async fn viewer_surfaces_misconfigured_endpoint() {
    let mut viewer = Viewer::new(HttpSource::new(&Config::new("not a url")).unwrap());

    assert_eq!(viewer.activate().await, Some(Committed::Failed));
    assert!(viewer.loader().error().unwrap().contains("invalid endpoint"));
}

#[tokio::test]
async fn viewer_submits_main_query_over_http() {
    let (base, server) = serve_once("200 OK", TWO_LISTINGS).await;
    let mut viewer = Viewer::new(HttpSource::new(&Config::new(base)).unwrap());
    viewer.set_main_query("casa sol");

    assert_eq!(viewer.submit_query().await, Committed::Loaded);

    assert_eq!(
        server.await.unwrap(),
        "GET /api/properties/filtered?name=casa%20sol HTTP/1.1"
    );
    assert_eq!(viewer.current_view().meta.total_items, 2);
}
