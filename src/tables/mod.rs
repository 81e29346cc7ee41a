//! 기본 온도/단열 계수 산정에 쓰이는 고정 테이블 모음.
//! 우편번호→기후 구역, 기후 구역×고도 구간→기본 외기 온도, 단열 등급→손실 계수로 구성한다.

pub mod altitude;
pub mod climate;
pub mod isolation;

pub use altitude::AltitudeBand;
pub use climate::{ClimateTable, ClimateZone};
pub use isolation::IsolationClass;
