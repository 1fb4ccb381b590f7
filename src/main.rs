use azure_autoscale_rm::config;
use azure_autoscale_rm::output::print_summary;
use azure_autoscale_rm::run_autoscale_scenario;
use std::error::Error;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Keep main.rs thin, everything testable lives in the lib.
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config_file = config::config_path();
    if !Path::new(&config_file).exists() {
        log::error!("Expecting {config_file} in current folder");
        eprintln!("Error: Expecting {config_file} in current folder");
        std::process::exit(1);
    }

    let deployment = run_autoscale_scenario(&config_file).await?;
    print_summary(&deployment);

    log::info!("#End main()");
    Ok(())
}
