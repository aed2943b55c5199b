mod app;
mod clock;
mod config;
mod dashboard;
mod gui;
mod series;
mod trades;
mod tui;
mod ui;
mod webui;

use app::App;
use clap::Parser;
use config::{ClockFormat, DashboardConfig};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "3RD EYE: trading-portfolio dashboard with live clock and sample charts",
    after_help = "EXAMPLES:
    # Terminal dashboard
    cargo run --release

    # Desktop window
    cargo run --release -- --gui

    # Browser dashboard on port 9000
    cargo run --release -- --webui --webui-port 9000"
)]
struct Args {
    /// Launch in GUI mode
    #[arg(long)]
    gui: bool,

    /// Launch in WebUI mode
    #[arg(long)]
    webui: bool,

    /// WebUI server port
    #[arg(long, default_value_t = config::DEFAULT_WEBUI_PORT)]
    webui_port: u16,

    /// Show the clock as 15:04:05 instead of 3:04:05 PM (overrides THIRDEYE_CLOCK_FORMAT)
    #[arg(long)]
    twenty_four_hour: bool,

    /// Name used in the greeting (overrides THIRDEYE_TRADER)
    #[arg(long)]
    trader: Option<String>,
}

impl Args {
    fn apply(&self, cfg: &mut DashboardConfig) {
        if self.twenty_four_hour {
            cfg.clock_format = ClockFormat::TwentyFourHour;
        }
        if let Some(name) = self.trader.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            cfg.trader_name = name.to_string();
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("thirdeye=info,wgpu_core=error,wgpu_hal=error")
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut cfg = match DashboardConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return Ok(());
        }
    };
    args.apply(&mut cfg);
    info!(
        "Dashboard config: trader={}, clock={:?}, tick={:?}",
        cfg.trader_name, cfg.clock_format, cfg.tick_interval
    );

    if args.gui {
        let gui_app = gui::GuiApp::new(cfg);
        let options = eframe::NativeOptions::default();
        info!("Launching GUI");
        eframe::run_native(
            config::BRAND,
            options,
            Box::new(move |_cc| Ok(Box::new(gui_app))),
        ).map_err(|e| io::Error::other(e.to_string()))?;
        return Ok(());
    }

    if args.webui {
        match webui::run_webui_server(args.webui_port, cfg).await {
            Ok(_) => info!("WebUI exited."),
            Err(e) => error!("WebUI failed: {:#}", e),
        }
        return Ok(());
    }

    let mut terminal = tui::init()?;
    let mut app = App::new(cfg);
    let res = app.run(&mut terminal).await;

    tui::restore()?;

    if let Err(e) = res {
        error!("Error: {:?}", e);
    }

    Ok(())
}
