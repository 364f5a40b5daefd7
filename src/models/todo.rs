use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update payload. `description` is tri-state: absent means "leave
/// unchanged", explicit `null` clears the field, a string replaces it.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateTodo {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

// Maps a present-but-null field to Some(None) instead of None, so serde's
// default (absent -> None) stays distinguishable from an explicit null.
fn deserialize_explicit_null<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Debug)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
    pub count: usize,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn not_found() -> Self {
        ErrorResponse {
            detail: "Todo not found".to_string(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

fn check_title(title: &str, errors: &mut Vec<ValidationError>) {
    let len = title.trim().chars().count();
    if len == 0 || len > TITLE_MAX_LEN {
        errors.push(ValidationError {
            field: "title",
            message: format!("title must be between 1 and {} characters", TITLE_MAX_LEN),
        });
    }
}

fn check_description(description: &str, errors: &mut Vec<ValidationError>) {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.push(ValidationError {
            field: "description",
            message: format!(
                "description must be at most {} characters",
                DESCRIPTION_MAX_LEN
            ),
        });
    }
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        if let Some(description) = &self.description {
            check_description(description, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

impl UpdateTodo {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(Some(description)) = &self.description {
            check_description(description, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}
