/// Pretty-print a decision log written by the agent
///
/// Reads the JSON produced by DecisionLog::save_to_file

use mdpgrid::decision_log::DecisionLog;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <decision_log.json>", args[0]);
        eprintln!("Prints every logged decision and a summary");
        std::process::exit(1);
    }

    let log = DecisionLog::load_from_file(&args[1])?;
    log.print();

    println!("=== Summary ===");
    println!("{}", log.summary());

    Ok(())
}
