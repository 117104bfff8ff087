use devserve::{logger, ContentTypeTable, Server, ServerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ServerConfig::from_current_dir()?;
    logger::init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = cfg.port;
    let server = Server::bind(cfg, ContentTypeTable::default())?;

    logger::log_server_start(port);
    server.run().await;
    Ok(())
}
