use clap::Parser;
use flowrel::cli::{self, Cli};
use flowrel::{logging, ui};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Err(e) = cli::run(cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
