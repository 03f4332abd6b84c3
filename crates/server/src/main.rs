#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nisa_server::start().await
}
