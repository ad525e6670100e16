use house_viewer::ViewerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::from_env();
    log::info!("Starting {} ({}x{})", config.title, config.window_size.0, config.window_size.1);

    house_viewer::run(config)?;
    Ok(())
}
