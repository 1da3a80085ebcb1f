// SPDX-License-Identifier: MPL-2.0
use iced_toast::app::{self, Flags};
use iced_toast::paths;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Iced Toast demo

USAGE:
  iced_toast [OPTIONS]

OPTIONS:
  -h, --help              Print help information
  --config <path>         Load settings from this TOML file
  --config-dir <path>     Directory holding settings.toml
  --data-dir <path>       Directory for the one-shot registry
  --persist-one-shot      Remember one-shot toasts across restarts
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let mut flags = match Flags::from_args(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.take(), flags.config_dir.take());

    app::run(flags)
}
