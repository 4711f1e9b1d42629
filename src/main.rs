#[actix_web::main]
async fn main() -> std::io::Result<()> {
    laundry_invoice_server::run().await
}
