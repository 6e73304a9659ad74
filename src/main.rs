use clap::Parser;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage errors exit 1; --help and --version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Note: rendering pages requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Using WebDriver at {}; set WEBDRIVER_URL or --webdriver-url to change it",
        config.browser.webdriver_url
    );

    match site_pdf::run(&config).await {
        Ok(report) => {
            if let Some(combined) = &report.combined {
                ::log::info!("Combined PDF saved as {}", combined.display());
            }
            ::log::info!(
                "Wrote {} files to {}",
                report.artifacts.len(),
                config.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
