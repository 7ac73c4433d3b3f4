#[tokio::main]
async fn main() {
    if let Err(e) = daily_todo_server::start_server().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
