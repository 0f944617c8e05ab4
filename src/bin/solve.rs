/// Plan once on a layout file and print what the agent sees
///
/// Usage: solve <layout.lay> [--rewards] [--log <decision_log.json>]

use mdpgrid::render::{policy_to_string, rewards_to_string, utilities_to_string};
use mdpgrid::{Config, Layout, MdpAgent, WorldSnapshot};
use std::env;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <layout.lay> [--rewards] [--log <decision_log.json>]", args[0]);
        eprintln!("Runs value iteration on a layout and prints utilities, policy and chosen move");
        std::process::exit(1);
    }

    init_logging();

    let mut config = Config::load();
    let mut show_rewards = false;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--rewards" => show_rewards = true,
            "--log" => {
                let path = rest.next().ok_or("--log needs a path")?;
                config.logging.enable_decision_log = true;
                config.logging.decision_log_path = path.clone();
            }
            other => return Err(format!("unknown argument '{}'", other).into()),
        }
    }

    let layout = Layout::load(Path::new(&args[1]))?;
    let mut agent = MdpAgent::register_initial_state(&layout, &config)?;
    let decision = agent.decide(&WorldSnapshot::observe(&layout))?;

    println!("=== Layout: {} ({}x{}) ===\n", args[1], layout.width, layout.height);
    if show_rewards {
        println!("Rewards:");
        println!("{}", rewards_to_string(agent.grid())?);
    }
    println!("Utilities:");
    println!("{}", utilities_to_string(agent.grid())?);
    println!("Policy:");
    println!("{}", policy_to_string(agent.grid(), &agent.solver().model)?);

    println!(
        "Agent at ({}, {}) chooses {} after {} sweeps ({:?})",
        layout.agent.x, layout.agent.y, decision.action, decision.outcome.sweeps, decision.outcome.termination
    );

    if let Some(log) = agent.finish() {
        log.save_to_file(&config.logging.decision_log_path)?;
        println!("Decision log written to {}", config.logging.decision_log_path);
    }

    Ok(())
}
