use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{FieldError, ValidationError};

/// Core product entity. `id` is supplied by the caller and is only a lookup
/// key; nothing checks it for uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Image reference, stored as given
    pub image: String,
    pub price: f64,
}

const MSG_MISSING: &str = "Field required";
const MSG_INT_TYPE: &str = "Input should be a valid integer";
const MSG_INT_PARSING: &str = "Input should be a valid integer, unable to parse string as an integer";
const MSG_INT_FRACTION: &str = "Input should be a valid integer, got a number with a fractional part";
const MSG_FLOAT_TYPE: &str = "Input should be a valid number";
const MSG_FLOAT_PARSING: &str = "Input should be a valid number, unable to parse string as a number";
const MSG_STRING_TYPE: &str = "Input should be a valid string";
const MSG_OBJECT_TYPE: &str = "Input should be a valid dictionary or object to extract fields from";

impl Product {
    /// Checks an untyped request body against the product shape.
    ///
    /// All six fields are checked and every failure is reported, not just the
    /// first. Numbers are coerced leniently: `id` accepts integral floats and
    /// integer strings, `price` accepts any number or numeric string. Unknown
    /// keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let Some(obj) = value.as_object() else {
            return Err(ValidationError::single(&["body"], "model_attributes_type", MSG_OBJECT_TYPE));
        };

        let mut errors = Vec::new();
        let id = int_field(obj, "id", &mut errors);
        let title = string_field(obj, "title", &mut errors);
        let description = string_field(obj, "description", &mut errors);
        let category = string_field(obj, "category", &mut errors);
        let image = string_field(obj, "image", &mut errors);
        let price = float_field(obj, "price", &mut errors);

        match (id, title, description, category, image, price) {
            (Some(id), Some(title), Some(description), Some(category), Some(image), Some(price))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id,
                    title,
                    description,
                    category,
                    image,
                    price,
                })
            }
            _ => Err(ValidationError { detail: errors }),
        }
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<&'a Value> {
    let value = obj.get(name);
    if value.is_none() {
        errors.push(FieldError::new(&["body", name], "missing", MSG_MISSING));
    }
    value
}

fn int_field(obj: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    let value = field(obj, name, errors)?;
    let result = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Ok(f as i64)
                } else if f.fract() != 0.0 {
                    Err(("int_from_float", MSG_INT_FRACTION))
                } else {
                    Err(("int_type", MSG_INT_TYPE))
                }
            } else {
                Err(("int_type", MSG_INT_TYPE))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ("int_parsing", MSG_INT_PARSING)),
        _ => Err(("int_type", MSG_INT_TYPE)),
    };

    result
        .map_err(|(kind, msg)| errors.push(FieldError::new(&["body", name], kind, msg)))
        .ok()
}

fn float_field(obj: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = field(obj, name, errors)?;
    let result = match value {
        Value::Number(n) => n.as_f64().ok_or(("float_type", MSG_FLOAT_TYPE)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or(("float_parsing", MSG_FLOAT_PARSING)),
        _ => Err(("float_type", MSG_FLOAT_TYPE)),
    };

    result
        .map_err(|(kind, msg)| errors.push(FieldError::new(&["body", name], kind, msg)))
        .ok()
}

fn string_field(obj: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match field(obj, name, errors)? {
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.push(FieldError::new(&["body", name], "string_type", MSG_STRING_TYPE));
            None
        }
    }
}
