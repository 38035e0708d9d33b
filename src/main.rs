use anyhow::Result;
use shelve::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
