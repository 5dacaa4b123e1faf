use clap::Parser;
use std::time;
use svplot::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{plot, validate},
    utils::util::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    log::trace!("CLI options set: {:?}", cli);

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        &**FULL_VERSION,
        cli.command.name()
    );

    let start_timer = time::Instant::now();
    match cli.command {
        Command::Plot(args) => {
            log::trace!("Plot arguments: {:#?}", args);
            plot(args.into())?
        }
        Command::Validate(args) => {
            log::trace!("Validate arguments: {:#?}", args);
            validate(args.into())?
        }
    }
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
