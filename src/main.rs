use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use crate::api::unsplash::client::Client;
use crate::application::Application;
use crate::config::{Args, Config};
use crate::core::command::System;

mod api;
mod application;
mod config;
mod core;
mod error;
mod helpers;
mod image_data;
mod provider;
#[cfg(test)]
mod test_support;

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env has to be loaded before clap reads the environment
    config::load_env_files();
    let args = Args::parse();

    // Initialize logger
    init_logger(args.verbose);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match Application::new(config, Client::new(None), &System).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
