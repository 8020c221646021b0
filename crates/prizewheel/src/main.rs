use prizewheel::config::{self, Config};
use prizewheel::gui::app::AppModel;
use prizewheel::gui::wheel::WheelState;
use prizewheel::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let prizes = match config.prize_list() {
        Ok(prizes) => prizes,
        Err(e) => {
            log::error!("Invalid prize list in config, using the default prizes: {}", e);
            Config::default().prize_list()?
        }
    };
    let state = WheelState::new(prizes, config.spin_duration_ms, config.distributed_start);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx.clone());

    let app = RelmApp::new("org.prizewheel.wheel");

    app.run::<AppModel>((state, tx, rx));
    Ok(())
}
