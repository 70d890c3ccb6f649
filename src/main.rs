use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = statement_cleaner::args::parse();
    statement_cleaner::cli::main(args)
}
