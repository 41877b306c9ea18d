//! main.rs
//! Entry point for nls

use nicels::app::App;
use nicels::config::Config;
use nicels::error::{ExitStatus, RenderError};
use nicels::utils::cli::{Cli, Environment};
use nicels::utils::logging::initialize_logging;

use clap::Parser;
use std::io::{self, BufWriter};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(cli.verbose) {
        eprintln!("nls: failed to initialize logging: {}", e);
    }

    if cli.init {
        let path = Config::default_path();
        match Config::generate_default(&path) {
            Ok(()) => println!("Default config written to {}", path.display()),
            Err(e) => {
                eprintln!("nls: {}", e);
                std::process::exit(ExitStatus::Serious.code());
            }
        }
        return;
    }

    let config = Config::load();
    let options = cli.render_options(config.general(), &Environment::probe());
    let theme = cli.theme(&config);
    tracing::debug!(?options, "resolved options");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let status = match App::new(&options, &theme).run(&cli.paths(), &mut out) {
        Ok(status) => status,
        Err(RenderError::Write(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitStatus::Ok,
        Err(e) => {
            eprintln!("nls: {}", e);
            ExitStatus::Serious
        }
    };
    drop(out);
    std::process::exit(status.code());
}
