// Copyright 2025 Alexandre D. Díaz
use actix_session::Session;
use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse, Result};
use minijinja::context;
use serde::{Deserialize, Serialize};

use sqlitedb::{models::bank, Pool};

use crate::db;
use crate::flash::{flash, Level};
use crate::minijinja_renderer::MiniJinjaRenderer;
use crate::utils::get_page_context;

static MSG_REQUIRED: &str = "Bank name and location are required!";
static MSG_NOT_FOUND: &str = "Bank not found!";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BankForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl BankForm {
    /// Trimmed name and location, or `None` if any of them is blank.
    pub fn cleaned(&self) -> Option<(String, String)> {
        let name = self.name.trim();
        let location = self.location.trim();
        if name.is_empty() || location.is_empty() {
            return None;
        }
        Some((name.to_string(), location.to_string()))
    }
}

/// A post without a urlencoded body counts as an empty form.
fn submitted_form(form: Option<web::Form<BankForm>>) -> BankForm {
    form.map(web::Form::into_inner).unwrap_or_default()
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn render_form(
    tmpl_env: &MiniJinjaRenderer,
    req: &HttpRequest,
    session: &Session,
    bank_id: Option<i64>,
    form: &BankForm,
) -> Result<HttpResponse> {
    let (page_name, title) = match bank_id {
        Some(_) => ("bank_edit", "Edit Bank"),
        None => ("bank_add", "Add Bank"),
    };
    Ok(tmpl_env.render(
        "pages/bank_form.html",
        context!(
            ..get_page_context(req, session, page_name),
            ..context!(
                title => title,
                bank_id => bank_id,
                form => form,
            )
        ),
    )?)
}

#[get("/")]
pub async fn route_index(
    pool: web::Data<Pool>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
) -> Result<HttpResponse> {
    let banks = match db::run(&pool, |conn| bank::get_all(conn)).await {
        Ok(banks) => banks,
        Err(err) => {
            log::error!("can't list banks: {err}");
            flash(&session, Level::Error, "An error occurred while loading the banks.");
            Vec::new()
        }
    };
    Ok(tmpl_env.render(
        "pages/index.html",
        context!(
            ..get_page_context(&req, &session, "index"),
            ..context!(
                banks => banks,
            )
        ),
    )?)
}

#[get("/banks/add")]
pub async fn route_add_form(
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
) -> Result<HttpResponse> {
    render_form(&tmpl_env, &req, &session, None, &BankForm::default())
}

#[post("/banks/add")]
pub async fn route_add(
    pool: web::Data<Pool>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
    form: Option<web::Form<BankForm>>,
) -> Result<HttpResponse> {
    let form = submitted_form(form);
    let Some((name, location)) = form.cleaned() else {
        flash(&session, Level::Error, MSG_REQUIRED);
        return render_form(&tmpl_env, &req, &session, None, &form);
    };

    match db::run(&pool, move |conn| bank::add(conn, &name, &location)).await {
        Ok(bank_id) => {
            log::info!("bank {bank_id} created");
            flash(&session, Level::Success, "Bank created successfully!");
            Ok(redirect("/"))
        }
        Err(err) => {
            log::error!("can't create bank: {err}");
            flash(&session, Level::Error, "An error occurred while creating the bank.");
            render_form(&tmpl_env, &req, &session, None, &form)
        }
    }
}

#[get("/banks/{bank_id}")]
pub async fn route_detail(
    pool: web::Data<Pool>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let bank_id = path.into_inner();
    match db::run(&pool, move |conn| bank::get_by_id(conn, &bank_id)).await {
        Ok(Some(bank)) => Ok(tmpl_env.render(
            "pages/bank_detail.html",
            context!(
                ..get_page_context(&req, &session, "bank_detail"),
                ..context!(
                    bank => bank,
                )
            ),
        )?),
        Ok(None) => {
            flash(&session, Level::Error, MSG_NOT_FOUND);
            Ok(redirect("/"))
        }
        Err(err) => {
            log::error!("can't load bank {bank_id}: {err}");
            flash(&session, Level::Error, "An error occurred while loading the bank.");
            Ok(redirect("/"))
        }
    }
}

#[get("/banks/{bank_id}/edit")]
pub async fn route_edit_form(
    pool: web::Data<Pool>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let bank_id = path.into_inner();
    match db::run(&pool, move |conn| bank::get_by_id(conn, &bank_id)).await {
        Ok(Some(bank)) => {
            let form = BankForm {
                name: bank.name,
                location: bank.location,
            };
            render_form(&tmpl_env, &req, &session, Some(bank_id), &form)
        }
        Ok(None) => {
            flash(&session, Level::Error, MSG_NOT_FOUND);
            Ok(redirect("/"))
        }
        Err(err) => {
            log::error!("can't load bank {bank_id}: {err}");
            flash(&session, Level::Error, "An error occurred while loading the bank.");
            Ok(redirect("/"))
        }
    }
}

#[post("/banks/{bank_id}/edit")]
pub async fn route_edit(
    pool: web::Data<Pool>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
    session: Session,
    path: web::Path<i64>,
    form: Option<web::Form<BankForm>>,
) -> Result<HttpResponse> {
    let bank_id = path.into_inner();
    let form = submitted_form(form);
    let Some((name, location)) = form.cleaned() else {
        flash(&session, Level::Error, MSG_REQUIRED);
        return render_form(&tmpl_env, &req, &session, Some(bank_id), &form);
    };

    match db::run(&pool, move |conn| bank::update(conn, &bank_id, &name, &location)).await {
        Ok(true) => {
            log::info!("bank {bank_id} updated");
            flash(&session, Level::Success, "Bank updated successfully!");
            Ok(redirect(&format!("/banks/{bank_id}")))
        }
        Ok(false) => {
            flash(&session, Level::Error, MSG_NOT_FOUND);
            Ok(redirect("/"))
        }
        Err(err) => {
            log::error!("can't update bank {bank_id}: {err}");
            flash(&session, Level::Error, "An error occurred while updating the bank.");
            render_form(&tmpl_env, &req, &session, Some(bank_id), &form)
        }
    }
}

#[post("/banks/{bank_id}/delete")]
pub async fn route_delete(
    pool: web::Data<Pool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let bank_id = path.into_inner();
    match db::run(&pool, move |conn| bank::delete(conn, &bank_id)).await {
        Ok(true) => {
            log::info!("bank {bank_id} deleted");
            flash(&session, Level::Success, "Bank deleted successfully!");
        }
        Ok(false) => flash(&session, Level::Error, MSG_NOT_FOUND),
        Err(err) => {
            log::error!("can't delete bank {bank_id}: {err}");
            flash(&session, Level::Error, "An error occurred while deleting the bank.");
        }
    }
    Ok(redirect("/"))
}
