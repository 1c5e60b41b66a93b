use napi::bindgen_prelude::*;

#[macro_use]
extern crate napi_derive;

pub mod form_api;
pub mod hints_api;
pub mod i18n_api;

#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn to_napi(e: impl std::fmt::Display) -> Error {
    Error::from_reason(e.to_string())
}
