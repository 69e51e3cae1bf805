use hftsim_runner::ScenarioConfig;

fn print_help() {
    eprintln!(
        r#"hftsim - discrete-event market-maker simulation

USAGE:
    hftsim <SCENARIO.json> [OPTIONS]

OPTIONS:
    --seed <N>          Override the scenario seed
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)
"#
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut scenario_path: Option<String> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--seed" | "-s" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a value"))?;
                seed = Some(value.parse()?);
            }
            arg if scenario_path.is_none() && !arg.starts_with('-') => {
                scenario_path = Some(arg.to_string());
            }
            arg => {
                print_help();
                anyhow::bail!("Unknown argument: {}", arg);
            }
        }
        i += 1;
    }

    let Some(path) = scenario_path else {
        print_help();
        anyhow::bail!("missing scenario file");
    };

    log::info!("Loading scenario from: {}", path);
    let mut scenario = ScenarioConfig::from_file(&path)?;
    if seed.is_some() {
        scenario.seed = seed;
    }

    let summary = scenario.run()?;

    log::info!("Simulation finished at t={}", summary.end_time);
    log::info!(
        "Delivered: {}  Undelivered: {}  Pending: {}",
        summary.delivered,
        summary.undelivered,
        summary.pending
    );
    for (kind, count) in &summary.messages_by_kind {
        log::info!("  {:<28} {}", kind, count);
    }

    Ok(())
}
