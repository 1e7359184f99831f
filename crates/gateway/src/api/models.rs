//! Query models for the gateway surface

use serde::Deserialize;

/// Optional identifier accepted by GET routes.
///
/// Captured as a raw string so a stray `?id=` on a route that does not
/// accept one is ignored instead of failing extraction; routes that do
/// accept it validate the value themselves.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}
