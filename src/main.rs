use std::process::ExitCode;

fn main() -> ExitCode {
    telechart_lib::init_tracing();

    match telechart_lib::run(std::env::args().skip(1)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
