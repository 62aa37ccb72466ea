mod cli;
mod infra;
mod resolve;
mod routes;
mod server;

use guidebook::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
