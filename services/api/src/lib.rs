mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use wage_levels::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
