use std::process::ExitCode;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use tracing::info;

use solar_orrery::cli::CliArgs;
use solar_orrery::config::Config;
use solar_orrery::gui::Simulation;
use solar_orrery::logging::init_logging;
use solar_orrery::planetarium::Planetarium;
use solar_orrery::scene::SceneBuilder;
use solar_orrery::texture::{
    FileAssetSource, HttpAssetSource, LogSink, RoutingAssetSource, TextureProvider,
};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (mut config, origin) = match Config::load_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(err) => {
            // Logging isn't set up yet
            eprintln!("Couldn't load {}: {}", args.config.display(), err);
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);
    init_logging(&config);
    info!("{}", origin);

    // Textures are all loaded before the window opens
    let source = RoutingAssetSource::new(
        FileAssetSource::new(config.textures.root.clone()),
        HttpAssetSource::new(),
    );
    let mut provider = TextureProvider::new(Box::new(source)).with_status_sink(Box::new(LogSink));
    let scene = SceneBuilder::new(config.textures.clone(), &config.scene).build(&mut provider);

    let mut window = Window::new_with_size(
        &config.window.title,
        config.window.width,
        config.window.height,
    );
    window.set_light(Light::Absolute(scene.key_light()));
    window.set_framerate_limit(config.window.framerate_limit);

    let planetarium = Planetarium::new(&config);
    let simulation = Simulation::new(planetarium, scene, &mut window, config.debug.show_fps);
    info!("Starting render loop");
    window.render_loop(simulation);

    info!("Window closed");
    ExitCode::SUCCESS
}
