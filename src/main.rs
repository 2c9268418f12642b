use anyhow::Result;
use clap::Parser;
use index_stats::cli::Cli;
use index_stats::{run, AutoConfirm, Confirmation, LineGate, NativeRenderer};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut gate: Box<dyn Confirmation> = if cli.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(LineGate::stdin())
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli.run_options(), &mut out, gate.as_mut(), &NativeRenderer::default())?;
    Ok(())
}
