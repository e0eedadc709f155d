use actix_web::{web, App, HttpServer};
use cinch_backend::routes;
use cinch_backend::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables are set by the runtime environment:
    // - Docker: via docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (set -a; . ./.env; set +a)
    let host = std::env::var("CINCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("CINCH_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("CINCH_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("Starting Cinch backend on http://{}:{}", host, port);

    let data = web::Data::new(AppState::new());

    HttpServer::new(move || {
        App::new()
            .wrap(actix_cors::Cors::permissive())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
