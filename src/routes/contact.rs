use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/*
    POST /api/contact
*/
pub async fn submit(input: web::Json<ContactMessage>) -> impl Responder {
    let contact = input.into_inner();

    if contact.email.trim().is_empty() || contact.message.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "Email and message are required"
        }));
    }

    info!(
        "Contact message from {} <{}>: {}",
        contact.name, contact.email, contact.subject
    );

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Thank you for your message! We'll get back to you soon."
    }))
}
