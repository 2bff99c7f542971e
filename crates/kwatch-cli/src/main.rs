use clap::Parser;
use kwatch_cli::{execute_convert, execute_decode, execute_encode, init_logging, load_effective_config, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let config = match load_effective_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    if let Err(error) = init_logging(&config.logging) {
        eprintln!("warning: {error}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Commands::Encode(command) => execute_encode(command, &config, &mut out),
        Commands::Decode(command) => execute_decode(command, &config, &mut out),
        Commands::Convert(command) => execute_convert(command, &config, &mut out),
    };

    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
