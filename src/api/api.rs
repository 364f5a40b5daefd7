use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use crate::models::todo::{CreateTodo, ErrorResponse, TodoListResponse, UpdateTodo};
use crate::repository::database::Database;

#[derive(Deserialize, Debug)]
pub struct ListQuery {
    pub search: Option<String>,
    pub completed: Option<bool>,
}

#[post("/todos")]
pub async fn create_todo(db: web::Data<Database>, new_todo: web::Json<CreateTodo>) -> HttpResponse {
    let new_todo = new_todo.into_inner();
    if let Err(errors) = new_todo.validate() {
        return HttpResponse::UnprocessableEntity().json(errors);
    }
    let todo = db.create_todo(new_todo);
    log::debug!("created todo {}", todo.id);
    HttpResponse::Created().json(todo)
}

#[get("/todos/{id}")]
pub async fn get_todo_by_id(db: web::Data<Database>, id: web::Path<String>) -> HttpResponse {
    match db.get_todo_by_id(&id) {
        Some(todo) => HttpResponse::Ok().json(todo),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found()),
    }
}

// A non-empty search term takes precedence; the completion filter is ignored
// when both are supplied.
#[get("/todos")]
pub async fn get_todos(db: web::Data<Database>, query: web::Query<ListQuery>) -> HttpResponse {
    let todos = match query.search.as_deref() {
        Some(term) if !term.is_empty() => db.search_todos(term),
        _ => db.filter_todos(query.completed),
    };
    let count = todos.len();
    HttpResponse::Ok().json(TodoListResponse { todos, count })
}

#[put("/todos/{id}")]
pub async fn update_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<String>,
    changes: web::Json<UpdateTodo>,
) -> HttpResponse {
    let changes = changes.into_inner();
    if let Err(errors) = changes.validate() {
        return HttpResponse::UnprocessableEntity().json(errors);
    }
    match db.update_todo_by_id(&id, changes) {
        Some(todo) => HttpResponse::Ok().json(todo),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found()),
    }
}

#[delete("/todos/{id}")]
pub async fn delete_todo_by_id(db: web::Data<Database>, id: web::Path<String>) -> HttpResponse {
    if db.delete_todo_by_id(&id) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::not_found())
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(create_todo)
            .service(get_todo_by_id)
            .service(get_todos)
            .service(update_todo_by_id)
            .service(delete_todo_by_id),
    );
}
