mod presenter;
mod state;
mod ui;

use clap::Parser;
use common::config::{ClientConfig, ConfigManager};
use common::games::snake::SnakeSession;
use common::profile::{YamlFileStore, player_name, set_player_name};
use common::{log, log_error, logger};
use eframe::egui;

use presenter::LocalPresenter;
use state::SharedState;
use ui::SnakeApp;

const DEFAULT_CONFIG_PATH: &str = "snake_client_config.yaml";

#[derive(Parser)]
#[command(name = "snake_client")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Stored in the profile and used for every score submitted from now on.
    #[arg(long)]
    player_name: Option<String>,
}

fn load_config(path: &str) -> Option<ClientConfig> {
    let config_manager: ConfigManager<_, ClientConfig> = ConfigManager::from_yaml_file(path);
    match config_manager.get_config() {
        Ok(config) => Some(config),
        Err(e) => {
            log_error!("Failed to load {}: {}", path, e);
            None
        }
    }
}

fn resolve_player_name(config: &ClientConfig, requested: Option<String>) -> String {
    let store = YamlFileStore::from_path(&config.profile_path);
    if let Some(name) = requested
        && !name.trim().is_empty()
        && let Err(e) = set_player_name(&store, &name)
    {
        log_error!("Failed to save player name: {}", e);
        return name.trim().to_string();
    }
    player_name(&store)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let shared_state = SharedState::new();
    let config = load_config(&args.config);

    match config {
        Some(config) => {
            let name = resolve_player_name(&config, args.player_name);
            log!("Playing as {}", name);

            let shared_state_clone = shared_state.clone();
            std::thread::spawn(move || {
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        log_error!("Failed to start runtime: {}", e);
                        shared_state_clone.set_bootstrap_failed();
                        return;
                    }
                };
                rt.block_on(async {
                    let presenter = LocalPresenter::new(shared_state_clone.clone());
                    match SnakeSession::launch(&config, name, presenter) {
                        Ok((handle, task)) => {
                            shared_state_clone.set_session(handle);
                            if let Err(e) = task.await {
                                log_error!("Session task failed: {}", e);
                            }
                        }
                        Err(e) => {
                            log_error!("Failed to start game: {}", e);
                            shared_state_clone.set_bootstrap_failed();
                        }
                    }
                });
            });
        }
        None => shared_state.set_bootstrap_failed(),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([680.0, 600.0])
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake",
        options,
        Box::new(|_cc| Ok(Box::new(SnakeApp::new(shared_state)))),
    )?;

    Ok(())
}
