use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod canvas;
mod maze;
mod memory;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Arguments come from the location hash, e.g. `#-vv&--seed=42`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    let args = location_hash
        .split(['#', '&'])
        .filter(|arg| !arg.is_empty());
    Args::try_parse_from(std::iter::once("playroom").chain(args))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let parsed = parse_args(&location_hash);
    let log_level = match &parsed {
        Ok(args) => args.verbose.log_level(),
        Err(_) => Some(log::Level::Warn),
    };
    if let Some(log_level) = log_level {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    let args = parsed.unwrap_or_else(|err| {
        log::warn!("ignoring location hash arguments: {}", err);
        Args::default()
    });
    log::debug!("seed: {:?}", args.seed);

    let root = document()
        .get_element_by_id("playroom")
        .expect("Could not find id=\"playroom\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { seed: args.seed })
        .render();
}
