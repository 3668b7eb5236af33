use serde::Deserialize;

/// Body for both `POST /plans` and `PUT /plans/:id`.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub name: String,
    pub price: f64,
    /// Months.
    pub duration: i32,
}
