// Copyright 2025 Alexandre D. Díaz
use actix_web::{get, Responder};

#[get("/hello/")]
pub async fn route() -> impl Responder {
    "Hello, World!"
}
