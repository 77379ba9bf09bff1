pub mod gemini;
#[cfg(test)]
pub mod mock;

use anyhow::Result;

use crate::domain::models::GatewayBox;
use crate::domain::models::GatewayName;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get(name: GatewayName) -> Result<GatewayBox> {
        match name {
            GatewayName::Gemini => return Ok(Box::<gemini::Gemini>::default()),
        }
    }
}
