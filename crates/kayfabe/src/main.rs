#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    kayfabe::cli::run().await
}
