use clap::Parser;

use cardroom_cli::cli::CardroomCli;

#[tokio::main]
async fn main() {
    cardroom_cli::init_logging();
    let cli = CardroomCli::parse();
    if let Err(e) = cardroom_cli::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}
