use nativ_mcp_bootstrap::{LauncherConfig, Orchestrator, ui};

fn main() {
    ui::init_logging();

    let config = LauncherConfig::from_env();
    std::process::exit(Orchestrator::system(config).run());
}
