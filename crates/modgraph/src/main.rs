#[tokio::main]
async fn main() -> anyhow::Result<()> {
    modgraph_lib::main().await
}
