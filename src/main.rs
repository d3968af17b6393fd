mod app;
mod audio;
mod catalog;
mod config;
mod error;
mod logging;
mod media;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
