#[tokio::main]
async fn main() {
    if let Err(e) = taskflow_lib::run().await {
        eprintln!("taskflow: {}", e);
        std::process::exit(1);
    }
}
