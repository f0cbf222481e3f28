use innovation_index::server;

#[tokio::main]
async fn main() {
    if let Err(err) = server::run().await {
        eprintln!("innovation-index: {err}");
        std::process::exit(1);
    }
}
