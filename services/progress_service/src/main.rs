use std::error::Error;

use progress_service::context::{Context, DatastoreKind};
use progress_service::datastore::{Datastore, DdbDatastore, MemoryDatastore};
use progress_service::demo::DemoSeeder;
use progress_service::svc::ProgressServiceImpl;
use service_core::telemetry::logging::{init_subscriber, make_subscriber};
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let ctx = Context::from_env()?;
    init_subscriber(make_subscriber(env!("CARGO_PKG_NAME"), &ctx.log_filter))?;

    match ctx.datastore.clone() {
        DatastoreKind::DynamoDb { endpoint, tables } => serve(&ctx, DdbDatastore::connect(endpoint, tables).await).await,
        DatastoreKind::Memory => {
            tracing::warn!("Using the in-memory datastore, nothing will be persisted.");
            serve(&ctx, MemoryDatastore::new()).await
        }
    }
}

async fn serve<D: Datastore + 'static>(ctx: &Context, datastore: D) -> Result<(), Box<dyn Error>> {
    if ctx.demo_data {
        DemoSeeder::new().seed_once(&datastore).await?;
    }

    tracing::info!(address = %ctx.listen_address, "Starting progress service.");
    Server::builder()
        .add_service(ProgressServiceImpl::new(datastore).into_server())
        .serve(ctx.listen_address)
        .await?;

    Ok(())
}
