use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use gator::fetcher::http_fetcher::HttpFetcher;
use gator::fetcher::{fetch_feed, FetchError, Fetcher};
use gator::normalizer::Normalizer;

/// Accept one connection, answer with `head` + `body`, and return the raw request.
async fn serve_once(head: String, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}/feed.xml", addr), handle)
}

async fn serve_status(status: &str, body: String) -> (String, JoinHandle<String>) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/rss+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    serve_once(head, body).await
}

fn rss_with_items(titles: &[String]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Served &amp;amp; fetched</title>\
         <link>https://example.com/</link><description>fixture</description>",
    );
    for (i, title) in titles.iter().enumerate() {
        xml.push_str(&format!(
            "<item><title>{}</title><link>https://example.com/{}</link><pubDate>day {}</pubDate></item>",
            title, i, i
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

#[tokio::test]
async fn test_served_feed_keeps_item_count_and_order() {
    let titles: Vec<String> = (0..12).map(|i| format!("post number {}", 12 - i)).collect();
    let (url, server) = serve_status("200 OK", rss_with_items(&titles)).await;

    let fetcher = HttpFetcher::new().unwrap();
    let feed = fetch_feed(&fetcher, &Normalizer::new(), &url).await.unwrap();

    assert_eq!(feed.title, "Served & fetched");
    assert_eq!(feed.items.len(), titles.len());
    let fetched: Vec<String> = feed.items.iter().map(|i| i.title.clone()).collect();
    assert_eq!(fetched, titles);
    assert_eq!(feed.items[3].pub_date, "day 3");

    server.await.unwrap();
}

#[tokio::test]
async fn test_request_sends_gator_user_agent() {
    let (url, server) = serve_status("200 OK", rss_with_items(&[])).await;

    let fetcher = HttpFetcher::new().unwrap();
    fetcher.fetch(&url).await.unwrap();

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /feed.xml "));
    assert!(request.contains("user-agent: gator\r\n"));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let (url, server) = serve_status("404 Not Found", "missing".into()).await;

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetch_feed(&fetcher, &Normalizer::new(), &url).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));

    server.await.unwrap();
}

#[tokio::test]
async fn test_truncated_body_is_body_read_error() {
    let head =
        "HTTP/1.1 200 OK\r\nContent-Length: 4096\r\nConnection: close\r\n\r\n".to_string();
    let (url, server) = serve_once(head, "<rss><channel>".into()).await;

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::BodyRead { .. }));

    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_xml_is_parse_error() {
    let (url, server) = serve_status("200 OK", "<html><body>oops</html>".into()).await;

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetch_feed(&fetcher, &Normalizer::new(), &url).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));

    server.await.unwrap();
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/feed.xml", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let fetcher = HttpFetcher::with_options("gator", Duration::from_millis(200)).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));

    server.abort();
}
