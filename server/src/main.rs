use std::process::ExitCode;

use todo_server::{logging, Config, StartupError};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_tracing();
    let result = match Config::from_env() {
        Ok(config) => todo_server::start(config).await,
        Err(err) => Err(StartupError::from(err)),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            ExitCode::FAILURE
        }
    }
}
