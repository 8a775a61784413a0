use log::info;
use seqdep_plot::config::Config;
use seqdep_plot::error::PlotError;
use seqdep_plot::pipeline;

fn main() -> Result<(), PlotError> {
    env_logger::init();
    let start_time = std::time::Instant::now();

    let config = Config::default();
    let output = pipeline::run(&config)?;

    info!(
        "wrote {} in {:.2} seconds",
        output.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
