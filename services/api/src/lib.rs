mod cli;
mod demo;
mod infra;
mod routes;
mod runner;
mod server;

use intake_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
