use bugledger_tui::{tracing_setup::init_tracing, try_main};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _guards = init_tracing()?;

    try_main().await.inspect_err(|e| {
        tracing::error!("bugledger exited with error: {e:?}");
    })
}
