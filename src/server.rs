//! Native HTTP server. Translates actix requests into the component's
//! request type so the same router serves both targets.

use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};

use crate::core::db::SharedDb;
use crate::handlers::route;

mod adapter {
    use actix_web::http::StatusCode;
    use actix_web::HttpRequest;
    use spin_sdk::http::{Method, Request, Response};

    pub fn actix_to_spin_request(req: &HttpRequest, body: actix_web::web::Bytes) -> Request {
        let method = match req.method().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "PATCH" => Method::Patch,
            other => Method::Other(other.to_string()),
        };

        let mut builder = Request::builder();
        builder.method(method).uri(req.uri().to_string());
        for (name, value) in req.headers() {
            if let Ok(val_str) = value.to_str() {
                builder.header(name.as_str(), val_str);
            }
        }

        builder.body(body.to_vec()).build()
    }

    pub fn spin_to_actix_response(spin_resp: Response) -> actix_web::HttpResponse {
        let status =
            StatusCode::from_u16(*spin_resp.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = actix_web::HttpResponse::build(status);
        for (name, value) in spin_resp.headers() {
            if let Some(v) = value.as_str() {
                response.append_header((name, v));
            }
        }

        response.body(spin_resp.body().to_vec())
    }
}

async fn handle_all(db: web::Data<SharedDb>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let spin_req = adapter::actix_to_spin_request(&req, body);
    adapter::spin_to_actix_response(route(db.get_ref(), spin_req))
}

/// Build a server on an already-bound listener.
pub fn run(listener: TcpListener, db: SharedDb) -> std::io::Result<Server> {
    let data = web::Data::new(db);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::route().to(handle_all))
    })
    .listen(listener)?
    .run();
    Ok(server)
}
