use clap::Parser;

use pdfbind::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = pdfbind::run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
