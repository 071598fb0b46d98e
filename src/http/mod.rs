//! HTTP protocol layer module
//!
//! Provides response building and form-body decoding, decoupled from
//! the handler's business logic.

pub mod form;
pub mod response;

// Re-export commonly used items
pub use form::{parse_squirrel_form, SquirrelForm};
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    build_created_response, build_json_response, build_no_content_response,
    build_options_response,
};
