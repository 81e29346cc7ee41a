//! 히트펌프 용량 산정 엔진. 계산 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 쓰도록 한다.
//!
//! 엔진 진입점은 [`compute_base_temperature`], [`ensure_zones_initialized`],
//! [`update_zones_losses`], [`total_losses_w`] 네 가지이며 호출 측이 이 순서로 묶어 쓴다.

pub mod app;
pub mod base_temperature;
pub mod config;
pub mod i18n;
pub mod state;
pub mod tables;
pub mod ui_cli;
pub mod zone_loss;

pub use base_temperature::{compute_base_temperature, BaseTemperatureResolver};
pub use zone_loss::{
    compute_zone_loss, ensure_zones_initialized, total_losses_w, update_zones_losses, ManualLoss,
};
