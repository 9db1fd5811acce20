mod basic_auth;
pub use self::basic_auth::*;

mod debug_response_body;
pub use self::debug_response_body::*;

mod form_params;
pub use self::form_params::*;

mod format_status_code;
pub use self::format_status_code::*;

mod request_path_formatter;
pub use self::request_path_formatter::*;
