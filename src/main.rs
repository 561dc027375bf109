#[tokio::main]
async fn main() {
    if let Err(e) = vitalpoint::run().await {
        tracing::error!("server exited with error: {e}");
        std::process::exit(1);
    }
}
