mod cli;
mod formations;
mod infra;
mod quiz;
mod routes;
mod server;

use oriento::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
