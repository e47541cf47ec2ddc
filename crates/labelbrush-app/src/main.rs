//! Command-line entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let [_, script, out_dir] = args.as_slice() else {
        eprintln!("usage: labelbrush <script.json> <out-dir>");
        return ExitCode::from(2);
    };

    log::info!("Replaying {}", script);
    match labelbrush_app::run_file(script, out_dir) {
        Ok(outcome) => {
            log::info!(
                "Wrote {} annotations from {} strokes to {}",
                outcome.session.layer().annotations().len(),
                outcome.host.labels.len(),
                out_dir
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
