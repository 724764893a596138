use clap::{ArgAction, Parser, Subcommand};
use std::net::SocketAddr;
use tracing::Level;

#[derive(Debug, Clone)]
pub enum Command {
    Serve {
        config_path: Option<String>,
        listen_address: Option<SocketAddr>,
        download_dir: Option<String>,
    },
    Fetch {
        config_path: Option<String>,
        download_dir: Option<String>,
        input_path: Option<String>,
        urls: Vec<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "imgfetch",
    version,
    about = "Download images from a list of URLs into a local folder, through a web form or the command line"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Serve the URL form and the downloaded images over HTTP
    Serve {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file (YAML, TOML or JSON)"
        )]
        config: Option<String>,

        #[arg(
            short = 'l',
            long = "listen",
            value_name = "ADDR",
            help = "Overrides the listen address (default: 0.0.0.0:8080)"
        )]
        listen: Option<SocketAddr>,

        #[arg(
            short = 'd',
            long = "download-dir",
            value_name = "DIR",
            help = "Overrides the folder images are saved into (default: downloaded_images)"
        )]
        download_dir: Option<String>,
    },

    /// Download the given URLs once and print where each image was saved
    Fetch {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file (YAML, TOML or JSON)"
        )]
        config: Option<String>,

        #[arg(
            short = 'd',
            long = "download-dir",
            value_name = "DIR",
            help = "Overrides the folder images are saved into (default: downloaded_images)"
        )]
        download_dir: Option<String>,

        #[arg(
            short = 'i',
            long = "input",
            value_name = "FILE",
            help = "Reads additional newline-separated URLs from FILE ('-' for stdin)"
        )]
        input: Option<String>,

        #[arg(value_name = "URL", help = "Image URLs to download, in order")]
        urls: Vec<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("hyper=warn".parse().unwrap()),
        )
        .init();

    let command = match cli.command {
        CliCommand::Serve {
            config,
            listen,
            download_dir,
        } => Command::Serve {
            config_path: config,
            listen_address: listen,
            download_dir,
        },
        CliCommand::Fetch {
            config,
            download_dir,
            input,
            urls,
        } => Command::Fetch {
            config_path: config,
            download_dir,
            input_path: input,
            urls,
        },
    };

    Args { command, log_level }
}
