use actix_web::{get, web, Error, HttpResponse};
use tokio::time::sleep;

#[tracing::instrument]
async fn load(item: u32) {
    tracing::info!(item, "Generates a breadcrumb");
    sleep(std::time::Duration::from_millis(100)).await;
}

#[get("/api/service_endpoint/{item}")]
async fn service_endpoint(item: web::Path<u32>) -> Result<HttpResponse, Error> {
    let item = item.into_inner();
    load(item).await;
    if item == 0 {
        tracing::error!(item, "Generates an event");
        return Ok(HttpResponse::BadRequest().body("item must not be zero"));
    }
    Ok(HttpResponse::Ok().body("OK."))
}
