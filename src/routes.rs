use crate::console::{attendance, employee};
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

async fn index() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/employees"))
        .finish()
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health));

    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{employee_id}
            .service(
                web::resource("/{employee_id}").route(web::get().to(employee::get_employee)),
            )
            // /employees/{employee_id}/delete
            .service(
                web::resource("/{employee_id}/delete")
                    .route(web::post().to(employee::delete_employee)),
            ),
    )
    .service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .route(web::get().to(attendance::list_attendance))
                    .route(web::post().to(attendance::mark_attendance)),
            )
            // /attendance/reload
            .service(
                web::resource("/reload").route(web::post().to(attendance::reload_attendance)),
            ),
    );
}

// GET  /employees            → re-fetch directory
// POST /employees            → create, re-fetch
// POST /employees/{id}/delete → delete, re-fetch
// GET  /attendance           → load attendance + employees together
// POST /attendance           → mark, reload attendance
// POST /attendance/reload    → drop present-day counts, load again
