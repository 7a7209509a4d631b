//! Small client for poking a running lighthouse server by hand.

use std::time::{Duration, SystemTime};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use url::Url;

const USER_AGENT: &str = "lighthouse-probe/1.0";

#[derive(Parser, Debug)]
#[command(name = "lighthouse-probe", about = "Exercise a lighthouse server")]
struct Args {
    /// Target host and port
    #[arg(long, default_value = "localhost:8080")]
    target: String,

    /// Scheme used to build the target URL
    #[arg(long, default_value = "http")]
    schema: String,

    /// Which probe to run
    #[arg(long, value_enum, default_value_t = Probe::BasicGet)]
    test: Probe,

    /// Seconds to wait before sending the request in the timeout probe
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Probe {
    BasicGet,
    BasicHead,
    BasicPut,
    Timeout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let url = Url::parse(&format!("{}://{}", args.schema, args.target))
        .with_context(|| format!("invalid target {}", args.target))?;

    println!("Selected test: {:?} against {}", args.test, url);

    match args.test {
        Probe::BasicGet => basic_get(&url).await,
        Probe::BasicHead => basic_head(&url).await,
        Probe::BasicPut => basic_put(&url).await,
        Probe::Timeout => slow_request(&url, Duration::from_secs(args.timeout)).await,
    }
}

async fn connect(url: &Url) -> anyhow::Result<TcpStream> {
    let host = url.host_str().context("target has no host")?;
    let port = url.port_or_known_default().context("target has no port")?;

    TcpStream::connect((host, port))
        .await
        .with_context(|| format!("failed to connect to {host}:{port}"))
}

/// Sends one request and returns the raw response head and body.
async fn exchange(url: &Url, method: &str, headers: &[(&str, String)], body: &[u8]) -> anyhow::Result<(String, Vec<u8>)> {
    let mut stream = connect(url).await?;

    let mut request = format!("{} {} HTTP/1.0\r\nUser-Agent: {}\r\n", method, url.path(), USER_AGENT);
    for (name, value) in headers {
        request.push_str(&format!("{name}: {value}\r\n"));
    }
    request.push_str("\r\n");

    stream.write_all(request.as_bytes()).await?;
    stream.write_all(body).await?;
    stream.flush().await?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await?;

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .context("response has no header terminator")?;
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let body = raw[split + 4..].to_vec();
    Ok((head, body))
}

fn content_length(head: &str) -> Option<usize> {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
}

async fn basic_get(url: &Url) -> anyhow::Result<()> {
    let (head, body) = exchange(url, "GET", &[], &[]).await?;

    println!("{head}");
    println!("Body length: {}", body.len());
    println!("Body:\n{}", String::from_utf8_lossy(&body));
    Ok(())
}

async fn basic_head(url: &Url) -> anyhow::Result<()> {
    let (head, body) = exchange(url, "HEAD", &[], &[]).await?;
    let declared = content_length(&head).unwrap_or(0);

    if !body.is_empty() {
        println!("HEAD response carried {} body bytes.", body.len());
    } else if declared == 0 {
        println!("HEAD response declares Content-Length: 0.");
    } else {
        println!("HEAD response is correct (no body).");
    }

    println!("{head}");
    Ok(())
}

async fn basic_put(url: &Url) -> anyhow::Result<()> {
    let payload = format!(
        r#"{{"id":1,"test":"data","date":"{}"}}"#,
        httpdate::fmt_http_date(SystemTime::now())
    );
    let headers = [
        ("Content-Type", "application/json".to_string()),
        ("Content-Length", payload.len().to_string()),
    ];

    let (head, body) = exchange(url, "PUT", &headers, payload.as_bytes()).await?;

    println!("{head}");
    println!("Body:\n{}", String::from_utf8_lossy(&body));
    Ok(())
}

/// Connects, stays silent for `wait`, then sends a bare request line.
async fn slow_request(url: &Url, wait: Duration) -> anyhow::Result<()> {
    let mut stream = connect(url).await?;

    tokio::time::sleep(wait).await;
    stream.write_all(b"GET / HTTP/1.0\r\n\r\n").await?;

    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        println!("{line}");
    }
    Ok(())
}
