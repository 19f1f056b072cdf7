//! Input validation for product payloads.
//!
//! Payloads arrive as raw JSON so that type mismatches can be reported per
//! field instead of failing deserialization as a whole. Creation requires every
//! field; a patch makes every field optional, but any field it does carry
//! (explicit `null` included) must satisfy the same rule as on creation.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    NotEmpty,
    String,
    Number,
    Integer,
    Object,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        Self { field, rule, message: message.into() }
    }
}

/// Non-empty list of violations returned by a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> { self.0.iter() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// True if `field` failed `rule`.
    pub fn has(&self, field: &str, rule: Rule) -> bool {
        self.0.iter().any(|v| v.field == field && v.rule == rule)
    }

    pub fn into_inner(self) -> Vec<Violation> { self.0 }

    /// A body that could not be read as a JSON object at all.
    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self(vec![Violation::new("body", Rule::Object, message)])
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&msgs.join("; "))
    }
}

/// Largest magnitude a `decimal(6,2)` column holds.
pub fn price_limit() -> Decimal { Decimal::new(999_999, 2) }

/// Validated creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

pub fn validate_new_product(payload: &Value) -> Result<NewProduct, Violations> {
    let obj = as_object(payload)?;
    let mut out = Vec::new();

    let name = required(obj, "name", &mut out).and_then(|v| check_name(v, &mut out));
    let price = required(obj, "price", &mut out).and_then(|v| check_price(v, &mut out));
    let quantity = required(obj, "quantity", &mut out).and_then(|v| check_quantity(v, &mut out));

    match (name, price, quantity) {
        (Some(name), Some(price), Some(quantity)) => Ok(NewProduct { name, price, quantity }),
        _ => Err(Violations(out)),
    }
}

pub fn validate_product_patch(payload: &Value) -> Result<ProductPatch, Violations> {
    let obj = as_object(payload)?;
    let mut out = Vec::new();

    let patch = ProductPatch {
        name: obj.get("name").and_then(|v| check_name(v, &mut out)),
        price: obj.get("price").and_then(|v| check_price(v, &mut out)),
        quantity: obj.get("quantity").and_then(|v| check_quantity(v, &mut out)),
    };

    if out.is_empty() { Ok(patch) } else { Err(Violations(out)) }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Violations> {
    payload.as_object().ok_or_else(|| {
        Violations(vec![Violation::new("body", Rule::Object, "request body must be a JSON object")])
    })
}

// Missing and `null` both count as absent on creation.
fn required<'a>(obj: &'a Map<String, Value>, field: &'static str, out: &mut Vec<Violation>) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            out.push(Violation::new(field, Rule::Required, format!("{field} is required")));
            None
        }
        Some(v) => Some(v),
    }
}

fn check_name(v: &Value, out: &mut Vec<Violation>) -> Option<String> {
    match v {
        Value::String(s) if s.trim().is_empty() => {
            out.push(Violation::new("name", Rule::NotEmpty, "name should not be empty"));
            None
        }
        Value::String(s) => Some(s.clone()),
        _ => {
            out.push(Violation::new("name", Rule::String, "name must be a string"));
            None
        }
    }
}

fn check_price(v: &Value, out: &mut Vec<Violation>) -> Option<Decimal> {
    match v {
        Value::Number(n) => {
            match to_decimal(n) {
                None => {
                    out.push(Violation::new("price", Rule::Number, "price is not a representable decimal"));
                    None
                }
                Some(price) if price.abs() > price_limit() => {
                    let limit = price_limit();
                    out.push(Violation::new("price", Rule::Range, format!("price must be between -{limit} and {limit}")));
                    None
                }
                Some(price) => Some(price),
            }
        }
        _ => {
            out.push(Violation::new("price", Rule::Number, "price must be a number"));
            None
        }
    }
}

fn check_quantity(v: &Value, out: &mut Vec<Violation>) -> Option<i32> {
    match v {
        Value::Number(n) => {
            let qty = to_i32(n);
            if qty.is_none() {
                out.push(Violation::new("quantity", Rule::Integer, "quantity must be a 32-bit integer"));
            }
            qty
        }
        _ => {
            out.push(Violation::new("quantity", Rule::Number, "quantity must be a number"));
            None
        }
    }
}

/// Prices carry two fractional digits.
fn to_decimal(n: &Number) -> Option<Decimal> {
    let d = if let Some(i) = n.as_i64() {
        Decimal::from(i)
    } else if let Some(u) = n.as_u64() {
        Decimal::from(u)
    } else {
        Decimal::try_from(n.as_f64()?).ok()?
    };
    let mut d = d.round_dp(2);
    d.rescale(2);
    Some(d)
}

fn to_i32(n: &Number) -> Option<i32> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    // 5.0 is an integer; 5.5 is not.
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}
