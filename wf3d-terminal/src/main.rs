//! WF3D Terminal Demo - Orbit Viewer
//!
//! Draws a ground grid, an axis frame and the camera target as a wireframe.
//! Usage: `wf3d-terminal [config.json]` or `wf3d-terminal --print-config`
//! Controls:
//!   - Left drag: pan
//!   - Right button + drag: orbit
//!   - Wheel or +/-: zoom
//!   - R: reset view
//!   - Q/ESC: Quit
use anyhow::Context;
use log::info;
use wf3d_core::ViewerConfig;
use wf3d_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--print-config") {
        println!("{}", ViewerConfig::default().to_json()?);
        return Ok(());
    }

    let config = match arg {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => ViewerConfig::default(),
    };
    info!("starting terminal viewer");

    let mut app = TerminalApp::new(config).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
