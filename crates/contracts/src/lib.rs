//! Общие контракты блог-платформы: агрегаты домена, DTO системной части
//! и состояние списковых форм админки.
//!
//! Крейт не зависит ни от web-фреймворка, ни от БД — его собирают и
//! backend (native), и frontend (wasm).

pub mod domain;
pub mod shared;
pub mod system;
