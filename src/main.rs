// src/main.rs

use plzrun::errors::INTERNAL_ERROR_EXIT_CODE;
use plzrun::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("plzrun error: {err:?}");
            INTERNAL_ERROR_EXIT_CODE
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
