#[tokio::main]
async fn main() {
    if let Err(e) = modshell_lib::run().await {
        tracing::error!("ModShell failed: {}", e);
        std::process::exit(1);
    }
}
