use astra::Server;
use listing_feed::config::{AppContext, ServerConfig};
use listing_feed::responses::error_to_response;
use listing_feed::router::handle;
use std::net::SocketAddr;

fn main() {
    let config = ServerConfig::from_env();

    let addr: SocketAddr = match config.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid bind address '{}': {e}", config.bind);
            std::process::exit(1);
        }
    };

    let ctx = match AppContext::new(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("❌ HTTP client setup failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Starting server at http://{addr}");
    println!(
        "Serving snapshot {} / upstream {}",
        ctx.snapshot_path.display(),
        config.upstream_url
    );

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &ctx) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
