use clap::Parser;
use knotdrift::commands;
use knotdrift::report::write_json;
use knotdrift::{Cli, Command, init_logging, loader};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Command::Sweep { source, output } => {
            let config = loader::resolve(&source)?;
            let report = commands::run_sweeps(config)?;
            write_json(&report, output.as_deref())?;
        }
        Command::Point {
            source,
            samples,
            output,
        } => {
            let config = loader::resolve(&source)?;
            let report = commands::run_point(&config, samples)?;
            write_json(&report, output.as_deref())?;
        }
        Command::Trefoil {
            points,
            strands,
            scale,
        } => {
            write_json(&commands::trefoil(strands, points, scale)?, None)?;
        }
        Command::Linking { max_lk } => {
            write_json(&commands::linking(max_lk), None)?;
        }
        Command::InitConfig { preset } => {
            print!("{}", commands::init_config(&preset)?);
        }
    }

    tracing::debug!("Done");
    Ok(())
}
