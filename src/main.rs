mod app;
mod config;
mod ecs;
mod error;
mod game;
mod hud;
mod input;
mod mode;
mod particles;
mod render;

fn main() {
    env_logger::init();
    log::info!("Cat Adventure starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
