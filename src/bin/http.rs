#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use resource_tracker::{Tracker, http_api};

    let addr: SocketAddr = std::env::var("RESOURCE_TRACKER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    println!("resource-tracker HTTP API listening on http://{addr}");
    let tracker = Tracker::new();
    http_api::serve(addr, tracker).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
