#![allow(warnings)]
//! Shopping List Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod dialog;
mod logger;
mod page;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let config = page::load_config();
    logger::init(config.log_level().unwrap_or(LevelFilter::Info));
    log::info!("starting with api base `{}`", config.api_base);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
