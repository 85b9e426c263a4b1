use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    health_notifier::setup_logging();
    run(service_fn(health_notifier::handler::function_handler)).await
}
