mod app;
mod forms;
mod logging;
mod model;
mod nav;
mod services;
mod theme;
mod ui;
mod widgets;

use anyhow::Result;

fn main() -> Result<()> {
    let cfg = ui::load_config()?;
    logging::init(&cfg)?;
    ui::run(cfg)
}
