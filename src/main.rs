use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use launchkey_layers::config::Config;
use launchkey_layers::launchkey::{Launchkey, Mode};
use launchkey_layers::ports::{self, LaunchkeyPorts};
use launchkey_layers::{layers, Result};

#[derive(Parser, Debug)]
#[command(
    name = "launchkey-layers",
    version,
    about = "Drive a Launchkey MK2 through stacked behaviour layers"
)]
struct Args {
    /// YAML config file (see launchkey.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode to request after the forced basic reset; overrides the config
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Print the available MIDI ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    if args.list_ports {
        let (inputs, outputs) = ports::list_ports(&config.client_name)?;
        println!("Inputs:");
        for name in &inputs {
            println!("  {name}");
        }
        println!("Outputs:");
        for name in &outputs {
            println!("  {name}");
        }
        return Ok(());
    }

    let (ports, output) = LaunchkeyPorts::open(&config.client_name)?;
    info!(output = output.port_name(), "opening Launchkey");

    let mut launchkey = Launchkey::new(output, layers::build_all(config.layers.as_slice())?)?;
    if config.mode != Mode::Basic {
        launchkey.set_mode(config.mode)?;
    }

    for (port, msg) in ports.messages() {
        launchkey.receive(port, msg);
    }

    info!("MIDI inputs closed, exiting");
    Ok(())
}
